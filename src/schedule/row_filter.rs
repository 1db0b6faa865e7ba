use chrono::NaiveDate;
use getset::CopyGetters;
use outage_schedule_utils::regex;
use thiserror::Error;

use crate::parser::table::{Cell, Row};

/// Case-insensitive markers of rows the provider has not finalized yet.
#[derive(Clone, Debug)]
pub struct PendingMarkers(Vec<String>);

impl PendingMarkers {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            markers
                .into_iter()
                .map(|m| m.as_ref().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        )
    }

    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.0.iter().any(|marker| text.contains(marker.as_str()))
    }
}

#[derive(Debug, Error)]
pub enum RowError {
    #[error("Could not parse date {text:?}: {source}")]
    DateParse {
        text: String,
        source: chrono::ParseError,
    },
    #[error("Midnight of {0} does not exist in the local timezone")]
    NonexistentLocalMidnight(NaiveDate),
}

/// A row that made it through the filter.
#[derive(Debug, CopyGetters)]
pub struct DataRow<'a> {
    #[getset(get_copy = "pub")]
    date: NaiveDate,
    #[getset(get_copy = "pub")]
    date_text: &'a str,
    /// Cells after the date cell, in column order.
    #[getset(get_copy = "pub")]
    group_cells: &'a [Cell],
}

#[derive(Debug)]
pub enum RowVerdict<'a> {
    /// The first cell is not a date, e.g. a header row.
    NotDataRow,
    Accepted(DataRow<'a>),
    Stale(NaiveDate),
    Pending(NaiveDate),
    Invalid(RowError),
}

/// Decides which rows describe today or a later day and are final.
#[derive(Clone, Debug, CopyGetters)]
pub struct DateRowFilter<'m> {
    #[getset(get_copy = "pub")]
    today: NaiveDate,
    pending: &'m PendingMarkers,
}

impl<'m> DateRowFilter<'m> {
    pub fn new(today: NaiveDate, pending: &'m PendingMarkers) -> Self {
        Self { today, pending }
    }

    pub fn classify<'a>(&self, row: &'a Row) -> RowVerdict<'a> {
        let Some((first, rest)) = row.cells().split_first() else {
            return RowVerdict::NotDataRow;
        };
        let Some(captures) = regex!(r"^\s*([0-9]{2}\.[0-9]{2}\.[0-9]{4})").captures(first.text())
        else {
            return RowVerdict::NotDataRow;
        };
        let date_text = captures.get(1).map_or("", |m| m.as_str());
        let date = match NaiveDate::parse_from_str(date_text, "%d.%m.%Y") {
            Ok(date) => date,
            Err(source) => {
                return RowVerdict::Invalid(RowError::DateParse {
                    text: date_text.to_owned(),
                    source,
                })
            }
        };
        if date < self.today {
            return RowVerdict::Stale(date);
        }
        if self.pending.matches(row.text()) {
            return RowVerdict::Pending(date);
        }
        RowVerdict::Accepted(DataRow {
            date,
            date_text,
            group_cells: rest,
        })
    }
}
