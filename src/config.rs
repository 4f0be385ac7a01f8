//! Forecast configuration and method selection

use crate::error::{ForecastError, Result};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Supported forecasting methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastMethod {
    /// Ordinary least squares line through the observations
    LinearTrend,
    /// Trailing-window mean baseline
    MovingAverage,
    /// Single exponential smoothing
    ExponentialSmoothing,
    /// Structural model with trend changepoints and seasonality
    Prophet,
}

impl ForecastMethod {
    /// Wire name of the method
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastMethod::LinearTrend => "linear_trend",
            ForecastMethod::MovingAverage => "moving_average",
            ForecastMethod::ExponentialSmoothing => "exponential_smoothing",
            ForecastMethod::Prophet => "prophet",
        }
    }
}

impl Default for ForecastMethod {
    fn default() -> Self {
        ForecastMethod::LinearTrend
    }
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForecastMethod {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear_trend" => Ok(ForecastMethod::LinearTrend),
            "moving_average" => Ok(ForecastMethod::MovingAverage),
            "exponential_smoothing" => Ok(ForecastMethod::ExponentialSmoothing),
            "prophet" => Ok(ForecastMethod::Prophet),
            other => Err(ForecastError::UnsupportedMethod(other.to_string())),
        }
    }
}

impl Serialize for ForecastMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Routed through FromStr so an unknown method surfaces the
// unsupported-method message instead of a generic variant error.
impl<'de> Deserialize<'de> for ForecastMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Tunable forecast parameters
///
/// Mirrors the JSON request contract; absent fields take the documented
/// defaults. The seasonality, prior-scale, and holiday fields are consumed
/// only by the structural model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Number of future periods to predict
    pub periods: usize,
    /// Enable the yearly seasonal component
    pub yearly_seasonality: bool,
    /// Enable the weekly seasonal component
    pub weekly_seasonality: bool,
    /// Enable the daily seasonal component
    pub daily_seasonality: bool,
    /// Trend changepoint flexibility
    pub changepoint_prior_scale: f64,
    /// Seasonal component strength
    pub seasonality_prior_scale: f64,
    /// Holiday component strength
    pub holidays_prior_scale: f64,
    /// Country code for built-in holiday dates
    pub country_holidays: Option<String>,
    /// Forecasting method to dispatch
    pub forecast_method: ForecastMethod,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            periods: 30,
            yearly_seasonality: true,
            weekly_seasonality: true,
            daily_seasonality: false,
            changepoint_prior_scale: 0.05,
            seasonality_prior_scale: 10.0,
            holidays_prior_scale: 10.0,
            country_holidays: None,
            forecast_method: ForecastMethod::LinearTrend,
        }
    }
}

impl ForecastConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.periods == 0 {
            return Err(ForecastError::InvalidParameter(
                "periods must be at least 1".to_string(),
            ));
        }
        let scales = [
            ("changepoint_prior_scale", self.changepoint_prior_scale),
            ("seasonality_prior_scale", self.seasonality_prior_scale),
            ("holidays_prior_scale", self.holidays_prior_scale),
        ];
        for (name, value) in scales {
            if !value.is_finite() || value <= 0.0 {
                return Err(ForecastError::InvalidParameter(format!(
                    "{} must be a positive number",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Set the number of periods to predict
    pub fn with_periods(mut self, periods: usize) -> Self {
        self.periods = periods;
        self
    }

    /// Set the forecasting method
    pub fn with_method(mut self, method: ForecastMethod) -> Self {
        self.forecast_method = method;
        self
    }

    /// Set the country for built-in holiday dates
    pub fn with_country_holidays<S: Into<String>>(mut self, country: S) -> Self {
        self.country_holidays = Some(country.into());
        self
    }
}
