use getset::Getters;
use itertools::Itertools;
use outage_schedule_utils::selector;
use scraper::{ElementRef, Html};
use thiserror::Error;

/// Rows of text cells, detached from the markup they were read from.
#[derive(Clone, PartialEq, Eq, Debug, Default, Getters)]
#[getset(get = "pub")]
pub struct Table {
    rows: Vec<Row>,
}

#[derive(Clone, PartialEq, Eq, Debug, Getters)]
#[getset(get = "pub")]
pub struct Row {
    cells: Vec<Cell>,
    /// Whole text of the row, including content outside of the cells.
    text: String,
}

#[derive(Clone, PartialEq, Eq, Debug, derive_more::From, derive_more::Display)]
pub struct Cell(String);

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Rows that announce the subqueue columns.
    pub fn header_rows<'a>(&'a self, marker: &'a str) -> impl Iterator<Item = &'a Row> + 'a {
        self.rows
            .iter()
            .filter(move |row| row.cells.iter().any(|cell| cell.text().contains(marker)))
    }
}

impl Row {
    pub fn new(cells: Vec<Cell>, text: String) -> Self {
        Self { cells, text }
    }

    /// A row whose text is exactly its cells joined by spaces.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells = cells
            .into_iter()
            .map(|s| Cell::from(Into::<String>::into(s)))
            .collect_vec();
        let text = cells.iter().map(Cell::text).join(" ");
        Self { cells, text }
    }
}

impl Cell {
    pub fn text(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No table was found in the page")]
    TableNotFound,
    #[error("The table has only {0} row(s)")]
    InsufficientRows(usize),
}

/// Reads the first `<table>` of the page.
pub fn parse(html: &Html) -> Result<Table, ExtractError> {
    let table = html
        .select(selector!("table"))
        .next()
        .ok_or(ExtractError::TableNotFound)?;
    let rows = table.select(selector!("tr")).map(parse_row).collect_vec();
    if rows.len() < 2 {
        return Err(ExtractError::InsufficientRows(rows.len()));
    }
    Ok(Table { rows })
}

fn parse_row(tr: ElementRef) -> Row {
    let cells = tr
        .select(selector!("td"))
        .map(|td| Cell(joined_text(td)))
        .collect();
    Row {
        cells,
        text: tr.text().collect(),
    }
}

fn joined_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .join(" ")
}
