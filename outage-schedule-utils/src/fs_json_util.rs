use std::{
    ffi::OsString,
    fmt::Debug,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use fs_err::File;
use serde::{Deserialize, Serialize};

pub fn read_json<P: Into<PathBuf> + Debug, T: for<'de> Deserialize<'de>>(
    path: P,
) -> anyhow::Result<T> {
    let path = path.into();
    (|| serde_json::from_reader(BufReader::new(File::open(&path)?)).map_err(anyhow::Error::new))()
        .with_context(|| {
            format!(
                "While trying to parse {path:?} as {}",
                std::any::type_name::<T>()
            )
        })
}

/// Writes `value` as indented JSON.
///
/// The content goes to a sibling `*.tmp` file first, which is then renamed over `path`,
/// so readers never observe a half-written file.
/// Missing parent directories are created.
pub fn write_json_pretty<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let tmp_path = {
        let mut name = path
            .file_name()
            .with_context(|| format!("{path:?} does not name a file"))?
            .to_owned();
        name.push(OsString::from(".tmp"));
        path.with_file_name(name)
    };
    {
        let mut writer = BufWriter::new(File::create(&tmp_path)?);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    fs_err::rename(&tmp_path, path)?;
    Ok(())
}

pub fn read_toml<P: Into<PathBuf> + Debug, T: for<'de> Deserialize<'de>>(
    path: P,
) -> anyhow::Result<T> {
    let path = path.into();
    (|| toml::from_str(&fs_err::read_to_string(&path)?).map_err(anyhow::Error::new))().with_context(
        || {
            format!(
                "While trying to parse {path:?} as {}",
                std::any::type_name::<T>()
            )
        },
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{read_json, write_json_pretty};

    #[test]
    fn write_creates_parent_and_leaves_no_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("doc.json");
        let value = BTreeMap::from([("Рівне", 1)]);
        write_json_pretty(&path, &value).unwrap();

        let text = fs_err::read_to_string(&path).unwrap();
        assert!(text.contains("Рівне"), "non-ASCII must not be escaped: {text}");
        assert!(!dir.path().join("out").join("doc.json.tmp").exists());
        let read: BTreeMap<String, i32> = read_json(&path).unwrap();
        assert_eq!(read["Рівне"], 1);
    }

    #[test]
    fn read_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = read_json::<_, serde_json::Value>(&path).unwrap_err();
        assert!(format!("{err:?}").contains("missing.json"));
    }
}
