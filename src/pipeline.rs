use std::fmt::Display;

use anyhow::Context;
use log::{info, warn};
use scraper::Html;

use crate::{
    chrono_util::Clock,
    config::Config,
    diff::{diff, DiffOutcome},
    document::build_document,
    parser::{
        self,
        table::{ExtractError, Table},
    },
    schedule::{aggregate::aggregate, row_filter::DateRowFilter},
    store::DocumentStore,
};

/// What a page yielded before any filtering.
#[derive(Debug)]
pub struct ExtractedPage {
    pub table: Result<Table, ExtractError>,
    pub update: Option<String>,
}

impl ExtractedPage {
    pub fn parse(html: &str, config: &Config) -> Self {
        let html = Html::parse_document(html);
        let table = parser::table::parse(&html);
        let update = parser::update_info::parse(&html, &config.update_marker);
        match &update {
            Some(update) => info!("Provider update time: {update}"),
            None => warn!("Update time was not found on the page; the current time will be used"),
        }
        Self { table, update }
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    Written,
    Unchanged,
    /// Data differs from the previous document, but writing was not requested.
    DryRun,
    NoUsableData(NoDataReason),
}

#[derive(Debug)]
pub enum NoDataReason {
    Extract(ExtractError),
    NoDataRows,
}

impl Display for NoDataReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoDataReason::Extract(e) => write!(f, "{e}"),
            NoDataReason::NoDataRows => write!(f, "no row describes today or a later day"),
        }
    }
}

/// Turns an extracted page into a published document.
pub struct Pipeline<'a, C, S> {
    config: &'a Config,
    clock: C,
    store: S,
}

impl<'a, C: Clock, S: DocumentStore> Pipeline<'a, C, S> {
    pub fn new(config: &'a Config, clock: C, store: S) -> Self {
        Self {
            config,
            clock,
            store,
        }
    }

    pub fn run(&self, page: ExtractedPage, dry_run: bool) -> anyhow::Result<RunOutcome> {
        let table = match page.table {
            Ok(table) => table,
            Err(e) => return Ok(RunOutcome::NoUsableData(NoDataReason::Extract(e))),
        };
        let header_rows = table.header_rows(&self.config.subqueue_marker).count();
        info!(
            "Found a table with {} rows, {header_rows} of them header rows",
            table.rows().len()
        );

        let today = self.clock.today();
        info!("Today is {}", today.format("%d.%m.%Y"));
        let markers = self.config.pending_markers();
        let filter = DateRowFilter::new(today, &markers);
        let data = aggregate(&table, &filter, self.config.time_zone);
        if data.is_empty() {
            return Ok(RunOutcome::NoUsableData(NoDataReason::NoDataRows));
        }
        info!("Collected schedules for {} day(s)", data.len());

        let previous = self.store.read_previous()?;
        let outcome = diff(&data, previous.as_ref())
            .context("While comparing with the previous document")?;
        if outcome == DiffOutcome::Unchanged {
            return Ok(RunOutcome::Unchanged);
        }

        let document = build_document(self.config, &self.clock, data, page.update)?;
        if dry_run {
            return Ok(RunOutcome::DryRun);
        }
        self.store.write(&document)?;
        Ok(RunOutcome::Written)
    }
}
