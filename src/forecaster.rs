//! Method dispatch, fallback policy, and future-date assembly

use crate::config::{ForecastConfig, ForecastMethod};
use crate::engine::EngineStatus;
use crate::error::Result;
use crate::models::exponential_smoothing::ExponentialSmoothing;
use crate::models::linear_trend::LinearTrend;
use crate::models::moving_average::MovingAverage;
use crate::models::{ForecastModel, Projection, TrainedForecastModel};
use crate::series::Series;
use chrono::NaiveDate;
use serde::Serialize;
use std::time::Duration;

/// Default bound on advanced model fitting time
pub const DEFAULT_FIT_TIMEOUT: Duration = Duration::from_secs(30);

/// A single forecasted point with uncertainty bounds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    /// Date of the prediction
    #[serde(rename = "ds")]
    pub date: NaiveDate,
    /// Point estimate
    #[serde(rename = "yhat")]
    pub value: f64,
    /// Lower bound
    #[serde(rename = "yhat_lower")]
    pub lower: f64,
    /// Upper bound
    #[serde(rename = "yhat_upper")]
    pub upper: f64,
}

/// Outcome of a dispatched forecast
#[derive(Debug, Clone)]
pub struct ForecastRun {
    /// Forecasted points in date order
    pub points: Vec<ForecastPoint>,
    /// Method that actually produced the points
    pub method: ForecastMethod,
    /// Warnings accumulated while dispatching
    pub warnings: Vec<String>,
}

/// Method dispatcher over the supported forecasting models
///
/// Holds the advanced engine capability probed at startup and the bound on
/// advanced fitting time. Dispatch never fails a request because the advanced
/// engine is missing or slow; those cases fall back to the linear trend with
/// a warning.
#[derive(Debug, Clone)]
pub struct Forecaster {
    /// Advanced engine capability
    engine: EngineStatus,
    /// Bound on advanced model fitting time
    fit_timeout: Duration,
}

impl Forecaster {
    /// Create a forecaster with the given engine capability
    pub fn new(engine: EngineStatus) -> Self {
        Self {
            engine,
            fit_timeout: DEFAULT_FIT_TIMEOUT,
        }
    }

    /// Set the bound on advanced model fitting time
    pub fn with_fit_timeout(mut self, timeout: Duration) -> Self {
        self.fit_timeout = timeout;
        self
    }

    /// Get the engine capability
    pub fn engine(&self) -> &EngineStatus {
        &self.engine
    }

    /// Forecast future points for a series under the given configuration
    pub fn forecast(&self, series: &Series, config: &ForecastConfig) -> Result<ForecastRun> {
        config.validate()?;
        let periods = config.periods;
        let mut warnings = Vec::new();

        let (projection, method) = match config.forecast_method {
            ForecastMethod::LinearTrend => (
                self.run_linear(series, periods)?,
                ForecastMethod::LinearTrend,
            ),
            ForecastMethod::MovingAverage => {
                let trained = MovingAverage::default().train(series)?;
                (trained.forecast(periods)?, ForecastMethod::MovingAverage)
            }
            ForecastMethod::ExponentialSmoothing => {
                let trained = ExponentialSmoothing::default().train(series)?;
                (
                    trained.forecast(periods)?,
                    ForecastMethod::ExponentialSmoothing,
                )
            }
            ForecastMethod::Prophet => self.run_prophet(series, config, &mut warnings)?,
        };

        let dates = series.future_dates(periods);
        let mut points = Vec::with_capacity(periods);
        for (i, date) in dates.into_iter().enumerate() {
            points.push(ForecastPoint {
                date,
                value: projection.values()[i],
                lower: projection.lower()[i],
                upper: projection.upper()[i],
            });
        }

        Ok(ForecastRun {
            points,
            method,
            warnings,
        })
    }

    fn run_linear(&self, series: &Series, periods: usize) -> Result<Projection> {
        LinearTrend::new().train(series)?.forecast(periods)
    }

    #[cfg(feature = "prophet")]
    fn run_prophet(
        &self,
        series: &Series,
        config: &ForecastConfig,
        warnings: &mut Vec<String>,
    ) -> Result<(Projection, ForecastMethod)> {
        use crate::models::prophet::{supports_country, ProphetModel};
        use std::sync::mpsc;
        use std::thread;

        if !self.engine.available {
            return self.prophet_fallback(series, config.periods, warnings);
        }

        if let Some(country) = &config.country_holidays {
            if !supports_country(country) {
                log::warn!("no built-in holiday calendar for country {:?}", country);
                warnings.push(format!(
                    "no built-in holiday calendar for country {:?}; holiday regressors skipped",
                    country
                ));
            }
        }

        let model = ProphetModel::from_config(config);
        let periods = config.periods;
        let fit_series = series.clone();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = model
                .train(&fit_series)
                .and_then(|trained| trained.forecast(periods));
            let _ = tx.send(result);
        });

        match rx.recv_timeout(self.fit_timeout) {
            Ok(Ok(projection)) => Ok((projection, ForecastMethod::Prophet)),
            Ok(Err(err)) => {
                log::warn!("prophet fit failed: {}; falling back to linear_trend", err);
                warnings.push(format!(
                    "prophet fit failed ({}); fell back to linear_trend",
                    err
                ));
                Ok((self.run_linear(series, periods)?, ForecastMethod::LinearTrend))
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                log::warn!(
                    "prophet fit exceeded {:?}; falling back to linear_trend",
                    self.fit_timeout
                );
                warnings.push(format!(
                    "prophet fit timed out after {:?}; fell back to linear_trend",
                    self.fit_timeout
                ));
                Ok((self.run_linear(series, periods)?, ForecastMethod::LinearTrend))
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                log::warn!("prophet fit aborted; falling back to linear_trend");
                warnings.push("prophet fit aborted; fell back to linear_trend".to_string());
                Ok((self.run_linear(series, periods)?, ForecastMethod::LinearTrend))
            }
        }
    }

    #[cfg(not(feature = "prophet"))]
    fn run_prophet(
        &self,
        series: &Series,
        config: &ForecastConfig,
        warnings: &mut Vec<String>,
    ) -> Result<(Projection, ForecastMethod)> {
        self.prophet_fallback(series, config.periods, warnings)
    }

    fn prophet_fallback(
        &self,
        series: &Series,
        periods: usize,
        warnings: &mut Vec<String>,
    ) -> Result<(Projection, ForecastMethod)> {
        let reason = self
            .engine
            .detail
            .clone()
            .unwrap_or_else(|| "engine unavailable".to_string());
        log::warn!("prophet requested but {}; falling back to linear_trend", reason);
        warnings.push(format!(
            "prophet unavailable ({}); fell back to linear_trend",
            reason
        ));
        Ok((self.run_linear(series, periods)?, ForecastMethod::LinearTrend))
    }
}

impl Default for Forecaster {
    fn default() -> Self {
        Self::new(EngineStatus::probe())
    }
}
