//! JSON request/response contract for the forecasting core

use crate::config::ForecastConfig;
use crate::error::Result;
use crate::forecaster::{ForecastPoint, Forecaster};
use crate::metrics::{evaluate, ForecastMetrics};
use crate::series::{DataPoint, Series};
use serde::{Deserialize, Serialize};

/// Forecast request
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastRequest {
    /// Historical observations
    pub data: Vec<DataPoint>,
    /// Forecast configuration; absent fields take the documented defaults
    #[serde(default)]
    pub config: ForecastConfig,
}

/// Forecast response
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResponse {
    /// Normalized historical observations echoed back for charting
    pub historical: Vec<DataPoint>,
    /// Forecasted points
    pub forecast: Vec<ForecastPoint>,
    /// Backtested accuracy metrics; null when the series cannot support a
    /// holdout split
    pub metrics: Option<ForecastMetrics>,
    /// Warnings accumulated while forecasting
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Run the full forecasting pipeline for a request
///
/// Normalizes the series, dispatches the configured method, backtests for
/// accuracy metrics, and assembles the response with dates formatted as
/// `YYYY-MM-DD`.
pub fn generate_forecast(
    forecaster: &Forecaster,
    request: &ForecastRequest,
) -> Result<ForecastResponse> {
    let series = Series::parse(&request.data)?;
    let run = forecaster.forecast(&series, &request.config)?;
    let metrics = evaluate(forecaster, &series, &request.config);

    let historical = series
        .observations()
        .iter()
        .map(|obs| DataPoint::new(obs.date.format("%Y-%m-%d").to_string(), obs.value))
        .collect();

    Ok(ForecastResponse {
        historical,
        forecast: run.points,
        metrics,
        warnings: run.warnings,
    })
}
