// cellatlas-data/src/datasets/records.rs

use cellatlas_core::{CellAtlasError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;

/// One row of the train label file (`Id,Target`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetRecord {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Target")]
    pub target: String,
}

/// One row of the sample submission file. Only `Id` is read; other
/// columns such as `Predicted` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdRecord {
    #[serde(rename = "Id")]
    pub id: String,
}

/// Reads all rows of a headed CSV into `T` records.
///
/// Row numbers in error messages are 1-based data rows (the header excluded).
pub fn read_records<T, R>(reader: R) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut records = Vec::new();
    for (row, result) in rdr.deserialize().enumerate() {
        let record: T = result.map_err(|e| {
            CellAtlasError::Parse(format!("row {}: {}", row + 1, e))
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Fails with a parse error if any id occurs twice.
pub fn ensure_unique_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for (row, id) in ids.into_iter().enumerate() {
        if id.is_empty() {
            return Err(CellAtlasError::Parse(format!("row {}: empty Id", row + 1)));
        }
        if !seen.insert(id) {
            return Err(CellAtlasError::Parse(format!(
                "row {}: duplicate Id '{}'",
                row + 1,
                id
            )));
        }
    }
    Ok(())
}
