//! Forecast accuracy metrics and holdout backtesting

use crate::config::ForecastConfig;
use crate::error::{ForecastError, Result};
use crate::forecaster::Forecaster;
use crate::series::Series;
use serde::Serialize;
use std::fmt;

/// Forecast accuracy metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error, absent when every actual is zero
    pub mape: Option<f64>,
}

impl fmt::Display for ForecastMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics:")?;
        writeln!(f, "  MAE:  {:.4}", self.mae)?;
        writeln!(f, "  RMSE: {:.4}", self.rmse)?;
        match self.mape {
            Some(mape) => writeln!(f, "  MAPE: {:.4}%", mape)?,
            None => writeln!(f, "  MAPE: n/a")?,
        }
        Ok(())
    }
}

/// Calculate accuracy metrics for predictions against actual values
pub fn accuracy(actual: &[f64], predicted: &[f64]) -> Result<ForecastMetrics> {
    if actual.len() != predicted.len() || actual.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "Actual and predicted values must have the same non-zero length".to_string(),
        ));
    }

    let n = actual.len() as f64;
    let errors: Vec<f64> = actual
        .iter()
        .zip(predicted.iter())
        .map(|(&a, &p)| a - p)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let mse = errors.iter().map(|e| e.powi(2)).sum::<f64>() / n;
    let rmse = mse.sqrt();

    // Percentage error is undefined at zero actuals; average over the rest.
    let percentage_errors: Vec<f64> = actual
        .iter()
        .zip(errors.iter())
        .filter(|(&a, _)| a != 0.0)
        .map(|(&a, &e)| (e.abs() / a.abs()) * 100.0)
        .collect();
    let mape = if percentage_errors.is_empty() {
        None
    } else {
        Some(percentage_errors.iter().sum::<f64>() / percentage_errors.len() as f64)
    };

    Ok(ForecastMetrics { mae, rmse, mape })
}

/// Holdout horizon for a backtest
fn holdout(len: usize, periods: usize) -> usize {
    (len / 5).min(periods).max(1)
}

/// Backtest the configured method over the tail of the series
///
/// Holds out the last `min(periods, len / 5)` observations (at least one),
/// refits on the rest, and scores the predictions against the holdout.
/// Returns `None` when the series is too short for the split or the backtest
/// run itself fails; metrics are best-effort and never fail a request.
pub fn evaluate(
    forecaster: &Forecaster,
    series: &Series,
    config: &ForecastConfig,
) -> Option<ForecastMetrics> {
    let h = holdout(series.len(), config.periods);
    if series.len() < 2 * h + 2 {
        log::debug!(
            "series too short for a backtest (len={}, holdout={})",
            series.len(),
            h
        );
        return None;
    }

    let train = series.head(series.len() - h);
    let backtest_config = config.clone().with_periods(h);
    let run = match forecaster.forecast(&train, &backtest_config) {
        Ok(run) => run,
        Err(err) => {
            log::debug!("backtest dispatch failed: {}", err);
            return None;
        }
    };

    let actual: Vec<f64> = series.observations()[series.len() - h..]
        .iter()
        .map(|obs| obs.value)
        .collect();
    let predicted: Vec<f64> = run.points.iter().map(|point| point.value).collect();

    match accuracy(&actual, &predicted) {
        Ok(metrics) => Some(metrics),
        Err(err) => {
            log::debug!("backtest scoring failed: {}", err);
            None
        }
    }
}
