//! CSV ingestion for spreadsheet exports

use crate::error::{ForecastError, Result};
use crate::series::DataPoint;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Data loader for two-column spreadsheet exports
///
/// Produces raw data points for [`Series::parse`]; no semantic validation
/// happens here beyond row and column shape.
///
/// [`Series::parse`]: crate::series::Series::parse
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load raw data points from a `ds,y` CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<DataPoint>> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load raw data points from a `ds,y` CSV reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<DataPoint>> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let ds_idx = Self::find_column(&headers, "ds")?;
        let y_idx = Self::find_column(&headers, "y")?;

        let mut points = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let ds = record.get(ds_idx).unwrap_or("").trim().to_string();
            let raw_y = record.get(y_idx).unwrap_or("").trim();
            let y: f64 = raw_y.parse().map_err(|_| ForecastError::InvalidValue {
                value: raw_y.to_string(),
            })?;
            points.push(DataPoint::new(ds, y));
        }
        Ok(points)
    }

    /// Find a required column by name
    fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                ForecastError::DataError(format!("Required column '{}' not found in header", name))
            })
    }
}
