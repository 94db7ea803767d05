//! Loading the survey export from disk

use crate::error::{BpSelectError, Result};
use polars::prelude::*;
use std::fs::File;

/// CSV loader for the survey export
pub struct DataLoader {
    infer_schema_length: Option<usize>,
    parse_dates: bool,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            infer_schema_length: Some(100),
            parse_dates: true,
        }
    }

    /// Set how many rows to scan for schema inference
    pub fn with_infer_schema_length(mut self, n: usize) -> Self {
        self.infer_schema_length = Some(n);
        self
    }

    /// Toggle automatic date parsing (the survey's `zeit` column)
    pub fn with_parse_dates(mut self, parse_dates: bool) -> Self {
        self.parse_dates = parse_dates;
        self
    }

    /// Load a CSV file with headers
    pub fn load_csv(&self, path: &str) -> Result<DataFrame> {
        let file = File::open(path).map_err(|e| BpSelectError::DataError(e.to_string()))?;

        let parse_opts = CsvParseOptions::default().with_try_parse_dates(self.parse_dates);

        let reader = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(self.infer_schema_length)
            .with_parse_options(parse_opts)
            .into_reader_with_file_handle(file);

        reader
            .finish()
            .map_err(|e| BpSelectError::DataError(e.to_string()))
    }

    /// Load a CSV file with a custom delimiter
    pub fn load_csv_with_delimiter(&self, path: &str, delimiter: u8) -> Result<DataFrame> {
        let file = File::open(path).map_err(|e| BpSelectError::DataError(e.to_string()))?;

        let parse_opts = CsvParseOptions::default()
            .with_separator(delimiter)
            .with_try_parse_dates(self.parse_dates);

        let reader = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(self.infer_schema_length)
            .with_parse_options(parse_opts)
            .into_reader_with_file_handle(file);

        reader
            .finish()
            .map_err(|e| BpSelectError::DataError(e.to_string()))
    }
}
