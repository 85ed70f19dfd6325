//! Tabular file loading for account records

use anyhow::{anyhow, Result};
use polars::prelude::*;
use std::path::Path;

use crate::data::RawRecord;

/// Load account rows from a CSV (header row required) or Parquet file.
///
/// Every column is read as a string. Null cells are left out of the row so
/// that validation reports the field as missing for that row.
pub fn load_account_rows(path: &str) -> Result<Vec<RawRecord>> {
    log::info!("Reading account records: {}", path);

    let file_path = Path::new(path);
    if !file_path.exists() {
        return Err(anyhow!("File not found: {}", path));
    }

    let is_parquet = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("parquet"));

    let df = if is_parquet {
        LazyFrame::scan_parquet(path, Default::default())?.collect()?
    } else {
        // A zero-length inference window keeps every column as a string
        LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?
    };

    log::debug!("File schema: {:?}", df.schema());
    log::info!("Loaded {} account rows", df.height());

    dataframe_to_rows(&df)
}

/// Convert a frame into one field map per row
pub fn dataframe_to_rows(df: &DataFrame) -> Result<Vec<RawRecord>> {
    let mut rows: Vec<RawRecord> = (0..df.height()).map(|_| RawRecord::new()).collect();

    for column in df.get_columns() {
        let name = column.name().to_string();
        let values = column.cast(&DataType::String)?;
        let values = values.str()?;

        for (row, value) in values.into_iter().enumerate() {
            if let Some(value) = value {
                rows[row].insert(name.clone(), value.to_string());
            }
        }
    }

    Ok(rows)
}
