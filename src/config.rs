use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use log::info;
use outage_schedule_utils::fs_json_util::read_toml;
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};
use url::Url;

use crate::schedule::{hourly::SlotStatus, row_filter::PendingMarkers};

/// Deployment settings, read from a TOML file.
/// Every field falls back to the Rivne deployment.
#[serde_as]
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub region_id: String,
    pub url: Url,
    pub output_path: PathBuf,
    #[serde_as(as = "DisplayFromStr")]
    pub time_zone: Tz,
    pub pending_markers: Vec<String>,
    pub update_marker: String,
    pub subqueue_marker: String,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    pub time_type: TimeTypeLabels,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region_id: "Rivne".to_owned(),
            url: Url::parse("https://www.roe.vsei.ua/disconnections")
                .expect("the default URL is valid"),
            output_path: "out/Rivneoblenergo.json".into(),
            time_zone: chrono_tz::Europe::Kyiv,
            pending_markers: vec!["Очікується".to_owned()],
            update_marker: "Оновлено:".to_owned(),
            subqueue_marker: "Підчерга".to_owned(),
            fetch_timeout_secs: 60,
            user_agent: concat!(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) ",
                "AppleWebKit/537.36 (KHTML, like Gecko) ",
                "Chrome/120.0.0.0 Safari/537.36"
            )
            .to_owned(),
            time_type: TimeTypeLabels::default(),
        }
    }
}

impl Config {
    /// Reads `path`, or uses the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let config = read_toml(path)?;
                info!("Loaded configuration from {path:?}");
                Ok(config)
            }
            None => {
                info!("No configuration file given; using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn pending_markers(&self) -> PendingMarkers {
        PendingMarkers::new(&self.pending_markers)
    }
}

/// Display strings of the status tokens.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeTypeLabels {
    pub yes: String,
    pub maybe: String,
    pub no: String,
    pub first: String,
    pub second: String,
}

impl Default for TimeTypeLabels {
    fn default() -> Self {
        Self {
            yes: "Світло є".to_owned(),
            maybe: "Можливе відключення".to_owned(),
            no: "Світла немає".to_owned(),
            first: "Світла не буде перші 30 хв.".to_owned(),
            second: "Світла не буде другі 30 хв.".to_owned(),
        }
    }
}

impl TimeTypeLabels {
    pub fn get(&self, status: SlotStatus) -> &str {
        match status {
            SlotStatus::Yes => &self.yes,
            SlotStatus::Maybe => &self.maybe,
            SlotStatus::No => &self.no,
            SlotStatus::First => &self.first,
            SlotStatus::Second => &self.second,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            region_id = "Lviv"
            time_zone = "Europe/Warsaw"
            pending_markers = ["Очікується", "Уточнюється"]

            [time_type]
            yes = "On"
            "#,
        )
        .unwrap();
        assert_eq!(config.region_id, "Lviv");
        assert_eq!(config.time_zone, chrono_tz::Europe::Warsaw);
        assert!(config.pending_markers().matches("уточнюється"));
        assert_eq!(config.time_type.yes, "On");
        assert_eq!(config.time_type.no, "Світла немає");
        assert_eq!(config.output_path.to_str(), Some("out/Rivneoblenergo.json"));
    }

    #[test]
    fn rejects_unknown_fields_and_zones() {
        assert!(toml::from_str::<Config>("regoin_id = \"x\"").is_err());
        assert!(toml::from_str::<Config>("time_zone = \"Mars/Olympus\"").is_err());
    }
}
