//! Time series data handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw (timestamp, value) pair as supplied by clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Timestamp string, e.g. "2023-01-05"
    pub ds: String,
    /// Observed value
    pub y: f64,
}

impl DataPoint {
    /// Create a new data point
    pub fn new<S: Into<String>>(ds: S, y: f64) -> Self {
        Self { ds: ds.into(), y }
    }
}

/// A single validated observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Observed value
    pub value: f64,
}

/// A validated, strictly ordered time series
///
/// Dates are strictly increasing and no two observations share a date.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    /// Parse and normalize raw data points into a series
    ///
    /// Timestamps are parsed into calendar dates, observations are sorted by
    /// date, and duplicate dates collapse keeping the last-seen value (the
    /// collision count is logged). At least two observations must survive.
    pub fn parse(points: &[DataPoint]) -> Result<Self> {
        let mut observations = Vec::with_capacity(points.len());
        for point in points {
            if !point.y.is_finite() {
                return Err(ForecastError::InvalidValue {
                    value: point.y.to_string(),
                });
            }
            observations.push(Observation {
                date: parse_date(&point.ds)?,
                value: point.y,
            });
        }
        Self::from_observations(observations)
    }

    /// Normalize pre-parsed observations into a series
    pub fn from_observations(mut observations: Vec<Observation>) -> Result<Self> {
        for obs in &observations {
            if !obs.value.is_finite() {
                return Err(ForecastError::InvalidValue {
                    value: obs.value.to_string(),
                });
            }
        }

        // Stable sort keeps input order within equal dates, so the last
        // element of each run is the last-seen value.
        observations.sort_by_key(|obs| obs.date);

        let mut collapsed: Vec<Observation> = Vec::with_capacity(observations.len());
        let mut collisions = 0usize;
        for obs in observations {
            match collapsed.last_mut() {
                Some(last) if last.date == obs.date => {
                    *last = obs;
                    collisions += 1;
                }
                _ => collapsed.push(obs),
            }
        }
        if collisions > 0 {
            log::warn!(
                "collapsed {} duplicate timestamp(s), keeping the last value for each date",
                collisions
            );
        }

        if collapsed.len() < 2 {
            return Err(ForecastError::InsufficientData {
                needed: 2,
                got: collapsed.len(),
            });
        }

        Ok(Self {
            observations: collapsed,
        })
    }

    /// Get the observations
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Get the observed values in date order
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|obs| obs.value).collect()
    }

    /// Get the number of observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Get the first observation date
    pub fn first_date(&self) -> NaiveDate {
        self.observations[0].date
    }

    /// Get the last observation date
    pub fn last_date(&self) -> NaiveDate {
        self.observations[self.observations.len() - 1].date
    }

    /// Infer the typical interval between observations, in days
    ///
    /// The mode of the gaps between consecutive dates; the smallest gap wins
    /// ties. Defaults to daily.
    pub fn cadence_days(&self) -> i64 {
        let mut counts: HashMap<i64, usize> = HashMap::new();
        for pair in self.observations.windows(2) {
            let gap = (pair[1].date - pair[0].date).num_days();
            *counts.entry(gap).or_insert(0) += 1;
        }

        let mut best: Option<(i64, usize)> = None;
        for (gap, count) in counts {
            let better = match best {
                None => true,
                Some((best_gap, best_count)) => {
                    count > best_count || (count == best_count && gap < best_gap)
                }
            };
            if better {
                best = Some((gap, count));
            }
        }
        best.map(|(gap, _)| gap).unwrap_or(1)
    }

    /// Generate future dates following the series at its inferred cadence
    pub fn future_dates(&self, periods: usize) -> Vec<NaiveDate> {
        let step = self.cadence_days();
        let last = self.last_date();
        (1..=periods as i64)
            .map(|k| last + Duration::days(step * k))
            .collect()
    }

    /// Get the prefix sub-series containing the first `n` observations
    ///
    /// Used for backtest splits; `n` is clamped so the prefix stays a valid
    /// series, at least two observations and at most the full length.
    pub fn head(&self, n: usize) -> Self {
        let n = n.max(2).min(self.observations.len());
        Self {
            observations: self.observations[..n].to_vec(),
        }
    }
}

/// Parse a timestamp string into a calendar date
fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y/%m/%d") {
        return Ok(date);
    }
    if let Ok(datetime) = trimmed.parse::<NaiveDateTime>() {
        return Ok(datetime.date());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(datetime.date());
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive());
    }
    Err(ForecastError::InvalidTimestamp {
        value: raw.to_string(),
        reason: "expected an ISO calendar date such as 2023-01-05".to_string(),
    })
}
