use anyhow::Context;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use strum::IntoEnumIterator;
use typed_builder::TypedBuilder;

use crate::{
    chrono_util::{local_midnight, Clock},
    config::{Config, TimeTypeLabels},
    schedule::{
        aggregate::AggregateResult,
        hourly::{SlotStatus, SLOTS_PER_DAY},
    },
};

/// The published JSON document.
#[derive(Debug, Serialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct PersistedDocument {
    #[builder(setter(into))]
    region_id: String,
    #[serde(serialize_with = "serialize_utc_millis")]
    last_updated: DateTime<Utc>,
    fact: Fact,
    preset: Preset,
}

#[derive(Debug, Serialize)]
pub struct Fact {
    pub data: AggregateResult,
    /// When the provider says it last updated the schedule, `DD.MM.YYYY HH:MM`.
    pub update: String,
    /// Local midnight of today, in epoch seconds.
    pub today: i64,
}

/// Static display hints for the consumers of the document.
#[derive(Debug, Serialize)]
pub struct Preset {
    /// Slot → `["HH-HH", "HH:00", "HH:00"]`.
    pub time_zone: IndexMap<String, [String; 3]>,
    pub time_type: IndexMap<SlotStatus, String>,
}

impl Preset {
    pub fn new(labels: &TimeTypeLabels) -> Self {
        let time_zone = (1..=SLOTS_PER_DAY)
            .map(|slot| {
                let (start, end) = (slot - 1, slot);
                (
                    slot.to_string(),
                    [
                        format!("{start:02}-{end:02}"),
                        format!("{start:02}:00"),
                        format!("{end:02}:00"),
                    ],
                )
            })
            .collect();
        let time_type = SlotStatus::iter()
            .map(|status| (status, labels.get(status).to_owned()))
            .collect();
        Self {
            time_zone,
            time_type,
        }
    }
}

fn serialize_utc_millis<S: Serializer>(
    time: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format("%Y-%m-%dT%H:%M:%S%.3fZ"))
}

/// Wraps changed data into a full document.
///
/// `update` is the timestamp discovered on the page, if any;
/// otherwise the current local time is used.
pub fn build_document(
    config: &Config,
    clock: &impl Clock,
    data: AggregateResult,
    update: Option<String>,
) -> anyhow::Result<PersistedDocument> {
    let now = clock.now();
    let today = local_midnight(config.time_zone, now.date_naive())
        .with_context(|| format!("Midnight of {} does not exist", now.date_naive()))?
        .timestamp();
    let update = update.unwrap_or_else(|| now.format("%d.%m.%Y %H:%M").to_string());
    Ok(PersistedDocument::builder()
        .region_id(config.region_id.as_str())
        .last_updated(now.with_timezone(&Utc))
        .fact(Fact {
            data,
            update,
            today,
        })
        .preset(Preset::new(&config.time_type))
        .build())
}

/// The part of a previously written document that matters for diffing.
/// Everything else is ignored, so documents from older versions still load.
#[derive(Debug, Default, Deserialize)]
pub struct PreviousDocument {
    #[serde(default)]
    fact: PreviousFact,
}

#[derive(Debug, Default, Deserialize)]
struct PreviousFact {
    #[serde(default)]
    data: Option<Value>,
}

impl PreviousDocument {
    pub fn into_data(self) -> Option<Value> {
        self.fact.data
    }
}
