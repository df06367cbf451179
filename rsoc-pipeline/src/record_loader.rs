//! CSV ad performance loader.
//!
//! Parses the ad platform's performance export into `RawRecord`s.
//! Required columns:
//!   Original Post ID, Ad Creative Id, Ad Creative Media Type,
//!   Ad Creative Author Name, Locale, Search ROI, Search ROI%
//! Optional columns:
//!   Website Name, Original Article Name

use indexmap::IndexSet;
use std::io::Read;
use std::path::Path;

use crate::error::{PipelineError, PipelineResult};
use crate::types::RawRecord;

pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Original Post ID",
    "Ad Creative Id",
    "Ad Creative Media Type",
    "Ad Creative Author Name",
    "Locale",
    "Search ROI",
    "Search ROI%",
];

/// Fail with the first required column missing from `headers`.
pub fn validate_columns<'a, I>(headers: I) -> PipelineResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = headers.into_iter().collect();
    match REQUIRED_COLUMNS.iter().find(|col| !present.contains(*col)) {
        Some(missing) => Err(PipelineError::MissingColumn {
            column: (*missing).to_string(),
        }),
        None => Ok(()),
    }
}

/// Load records from a CSV reader. Columns are checked before any row is read.
pub fn load_records<R: Read>(reader: R) -> PipelineResult<Vec<RawRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    validate_columns(csv_reader.headers()?.iter())?;

    let mut records = Vec::new();
    for result in csv_reader.deserialize() {
        let record: RawRecord = result?;
        records.push(record);
    }

    log::debug!("loaded {} records", records.len());
    Ok(records)
}

/// Load records from a CSV file path.
pub fn load_records_file(path: &Path) -> PipelineResult<Vec<RawRecord>> {
    let file = std::fs::File::open(path).map_err(|source| PipelineError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_records(file)
}

/// Distinct non-empty locales in first-appearance order.
pub fn available_locales(records: &[RawRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.locale.as_str()))
}

/// Distinct non-empty author names in first-appearance order.
pub fn available_authors(records: &[RawRecord]) -> Vec<String> {
    distinct(records.iter().map(|r| r.ad_creative_author_name.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<IndexSet<&str>>()
        .into_iter()
        .map(String::from)
        .collect()
}
