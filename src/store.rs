use std::path::PathBuf;

use log::{info, warn};
use outage_schedule_utils::fs_json_util::{read_json, write_json_pretty};
use serde_json::Value;

use crate::document::{PersistedDocument, PreviousDocument};

/// Where the published document lives between runs.
pub trait DocumentStore {
    /// `fact.data` of the last written document, if there is one.
    fn read_previous(&self) -> anyhow::Result<Option<Value>>;

    fn write(&self, document: &PersistedDocument) -> anyhow::Result<()>;
}

/// A JSON file on the local filesystem.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentStore for JsonFileStore {
    /// A missing file means there is nothing to compare with.
    /// A broken file is reported and treated the same way, so that the next write replaces it.
    fn read_previous(&self) -> anyhow::Result<Option<Value>> {
        if !self.path.try_exists()? {
            info!("No previous document at {:?}", self.path);
            return Ok(None);
        }
        match read_json::<_, PreviousDocument>(&self.path) {
            Ok(previous) => Ok(previous.into_data()),
            Err(e) => {
                warn!("Ignoring the unreadable previous document: {e:?}");
                Ok(None)
            }
        }
    }

    fn write(&self, document: &PersistedDocument) -> anyhow::Result<()> {
        info!("Writing the document to {:?}", self.path);
        write_json_pretty(&self.path, document)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{DocumentStore, JsonFileStore};

    #[test]
    fn missing_and_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        let store = JsonFileStore::new(&path);
        assert_eq!(store.read_previous().unwrap(), None);

        fs_err::write(&path, "{ not json").unwrap();
        assert_eq!(store.read_previous().unwrap(), None);

        fs_err::write(&path, r#"{"fact": {"data": {"1": {}}}}"#).unwrap();
        assert_eq!(store.read_previous().unwrap(), Some(json!({"1": {}})));
    }
}
