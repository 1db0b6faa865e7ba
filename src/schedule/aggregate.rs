use std::collections::BTreeMap;

use chrono_tz::Tz;
use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    chrono_util::local_midnight,
    parser::{
        table::{Cell, Table},
        time_range::parse_time_ranges,
    },
    schedule::{
        group::GroupId,
        hourly::HourlySchedule,
        row_filter::{DataRow, DateRowFilter, RowError, RowVerdict},
    },
};

/// Schedules of every group for a single day.
pub type DateEntry = BTreeMap<GroupId, HourlySchedule>;

/// Day entries keyed by the epoch seconds of the day's local midnight.
///
/// Keys are kept as integers so that days are ordered numerically;
/// they are written out as strings.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct AggregateResult(BTreeMap<i64, DateEntry>);

impl AggregateResult {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, timestamp: i64) -> Option<&DateEntry> {
        self.0.get(&timestamp)
    }

    pub fn timestamps(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.keys().copied()
    }

    pub fn insert(&mut self, timestamp: i64, entry: DateEntry) -> Option<DateEntry> {
        self.0.insert(timestamp, entry)
    }
}

/// Assigns a group to every cell by position and builds its schedule.
///
/// A cell without any time range means the group has power all day.
pub fn map_groups(cells: &[Cell]) -> DateEntry {
    cells
        .iter()
        .enumerate()
        .map(|(offset, cell)| {
            let group = GroupId::from_offset(offset);
            let ranges = parse_time_ranges(cell.text());
            let schedule = if ranges.is_empty() {
                info!("  {group}: no outages");
                HourlySchedule::all_yes()
            } else {
                info!("  {group}: {} outage range(s)", ranges.len());
                debug!("  {group}: {ranges:?} from {:?}", cell.text());
                HourlySchedule::from_ranges(&ranges)
            };
            (group, schedule)
        })
        .collect()
}

/// Builds the day entries of every acceptable row of `table`.
///
/// Rows are independent: a row that cannot be used is logged and skipped.
pub fn aggregate(table: &Table, filter: &DateRowFilter, tz: Tz) -> AggregateResult {
    let mut result = AggregateResult::default();
    for row in table.rows() {
        let data_row = match filter.classify(row) {
            RowVerdict::Accepted(data_row) => data_row,
            RowVerdict::NotDataRow => continue,
            RowVerdict::Stale(date) => {
                info!("Skipping {} as it is in the past", date.format("%d.%m.%Y"));
                continue;
            }
            RowVerdict::Pending(date) => {
                info!(
                    "Skipping {} as its schedule is still pending",
                    date.format("%d.%m.%Y")
                );
                continue;
            }
            RowVerdict::Invalid(e) => {
                warn!("Skipping a row: {e}");
                continue;
            }
        };
        match aggregate_row(&data_row, tz) {
            Ok((timestamp, entry)) => {
                if result.insert(timestamp, entry).is_some() {
                    warn!(
                        "Date {} appears more than once; the last row wins",
                        data_row.date_text()
                    );
                }
            }
            Err(e) => warn!("Skipping a row: {e}"),
        }
    }
    result
}

fn aggregate_row(row: &DataRow, tz: Tz) -> Result<(i64, DateEntry), RowError> {
    info!("Processing {}", row.date_text());
    let timestamp = local_midnight(tz, row.date())
        .ok_or(RowError::NonexistentLocalMidnight(row.date()))?
        .timestamp();
    Ok((timestamp, map_groups(row.group_cells())))
}
