//! Trade results log (CSV) access

use crate::error::DataError;
use crate::models::trades::{RawTable, TradeRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PREDICTION_CORRECT: &str = "Prediction Correct";
pub const CURRENT_PRICE: &str = "Current Price";
pub const NEXT_PRICE: &str = "Next Price";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Filter, sort and page selection for the raw data view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDataQuery {
    pub filter_column: Option<String>,
    pub filter_value: Option<String>,
    pub sort_column: Option<String>,
    #[serde(default)]
    pub order: SortOrder,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page_size() -> usize {
    10
}

fn default_page() -> usize {
    1
}

impl Default for RawDataQuery {
    fn default() -> Self {
        Self {
            filter_column: None,
            filter_value: None,
            sort_column: None,
            order: SortOrder::Ascending,
            page_size: default_page_size(),
            page: default_page(),
        }
    }
}

/// One page of the raw data view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDataPage {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_rows: usize,
}

pub struct ResultsLog {
    path: PathBuf,
}

impl ResultsLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<File, DataError> {
        File::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DataError::ResultsLogMissing(self.path.clone()),
            _ => DataError::Csv(csv::Error::from(e)),
        })
    }

    pub fn load_records(&self) -> Result<Vec<TradeRecord>, DataError> {
        let records = read_records(self.open()?)?;
        debug!(path = %self.path.display(), count = records.len(), "Loaded trade records");
        Ok(records)
    }

    pub fn load_table(&self) -> Result<RawTable, DataError> {
        read_table(self.open()?)
    }
}

/// Parse the outcome columns of a results log.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<TradeRecord>, DataError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    };
    let correct_idx = column(PREDICTION_CORRECT)?;
    let current_idx = column(CURRENT_PRICE)?;
    let next_idx = column(NEXT_PRICE)?;

    let mut records = Vec::new();
    for (line, row) in csv_reader.records().enumerate() {
        let row = row?;
        let price = |idx: usize, name: &'static str| {
            let cell = row.get(idx).unwrap_or("").trim();
            if cell.is_empty() {
                return Ok(None);
            }
            cell.parse::<f64>().map(Some).map_err(|_| DataError::Parse {
                what: name,
                message: format!("row {}: '{}'", line + 1, cell),
            })
        };
        records.push(TradeRecord {
            prediction_correct: parse_outcome(row.get(correct_idx).unwrap_or("")),
            current_price: price(current_idx, CURRENT_PRICE)?,
            next_price: price(next_idx, NEXT_PRICE)?,
        });
    }
    Ok(records)
}

/// Read every column as text.
pub fn read_table<R: Read>(reader: R) -> Result<RawTable, DataError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let columns = csv_reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let rows = csv_reader
        .records()
        .map(|r| r.map(|row| row.iter().map(|c| c.to_string()).collect()))
        .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;
    Ok(RawTable { columns, rows })
}

fn parse_outcome(cell: &str) -> Option<bool> {
    match cell.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Apply filter, sort and pagination to a table.
///
/// Sorting compares numerically when both cells parse as numbers and falls
/// back to text comparison otherwise. A page past the end comes back empty.
pub fn query_table(table: &RawTable, query: &RawDataQuery) -> Result<RawDataPage, DataError> {
    if query.page_size == 0 {
        return Err(DataError::InvalidPage("page_size must be at least 1".to_string()));
    }
    if query.page == 0 {
        return Err(DataError::InvalidPage("page numbers start at 1".to_string()));
    }

    let mut rows: Vec<&Vec<String>> = table.rows.iter().collect();

    if let (Some(column), Some(value)) = (&query.filter_column, &query.filter_value) {
        if !value.is_empty() {
            let idx = table
                .column_index(column)
                .ok_or_else(|| DataError::MissingColumn(column.clone()))?;
            rows.retain(|row| row.get(idx).map(|c| c == value).unwrap_or(false));
        }
    }

    if let Some(column) = &query.sort_column {
        let idx = table
            .column_index(column)
            .ok_or_else(|| DataError::MissingColumn(column.clone()))?;
        rows.sort_by(|a, b| {
            let ordering = compare_cells(
                a.get(idx).map(String::as_str).unwrap_or(""),
                b.get(idx).map(String::as_str).unwrap_or(""),
            );
            match query.order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }

    let total_rows = rows.len();
    let total_pages = total_rows.div_ceil(query.page_size);
    let start = (query.page - 1).saturating_mul(query.page_size);
    let page_rows = rows
        .into_iter()
        .skip(start)
        .take(query.page_size)
        .cloned()
        .collect();

    Ok(RawDataPage {
        columns: table.columns.clone(),
        rows: page_rows,
        page: query.page,
        page_size: query.page_size,
        total_pages,
        total_rows,
    })
}

fn compare_cells(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y),
        _ => a.cmp(b),
    }
}
