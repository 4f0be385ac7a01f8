//! Forecasting models for time series data

use crate::error::{ForecastError, Result};
use crate::series::Series;
use statrs::statistics::Statistics;
use std::fmt::Debug;

pub mod exponential_smoothing;
pub mod linear_trend;
pub mod moving_average;
#[cfg(feature = "prophet")]
pub mod prophet;

/// Standard normal quantile for 95% intervals
pub const Z_95: f64 = 1.96;

/// Projection containing predicted values with uncertainty bounds
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Point estimates
    values: Vec<f64>,
    /// Lower bounds
    lower: Vec<f64>,
    /// Upper bounds
    upper: Vec<f64>,
}

impl Projection {
    /// Create a new projection
    ///
    /// Bounds are clamped so `lower <= value <= upper` holds at every step,
    /// even when a pathological fit hands in crossed bounds.
    pub fn new(values: Vec<f64>, lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if values.len() != lower.len() || values.len() != upper.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "Projection lengths differ: {} values, {} lower, {} upper",
                values.len(),
                lower.len(),
                upper.len()
            )));
        }

        let lower = lower
            .into_iter()
            .zip(values.iter())
            .map(|(lo, v)| lo.min(*v))
            .collect();
        let upper = upper
            .into_iter()
            .zip(values.iter())
            .map(|(hi, v)| hi.max(*v))
            .collect();

        Ok(Self {
            values,
            lower,
            upper,
        })
    }

    /// Create a flat projection with a symmetric margin at every step
    pub fn constant(value: f64, margin: f64, horizon: usize) -> Self {
        let margin = margin.abs();
        Self {
            values: vec![value; horizon],
            lower: vec![value - margin; horizon],
            upper: vec![value + margin; horizon],
        }
    }

    /// Get the point estimates
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the lower bounds
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Get the upper bounds
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Get the number of projected steps
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the projection is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Project future values with uncertainty bounds
    fn forecast(&self, horizon: usize) -> Result<Projection>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on a series
    fn train(&self, series: &Series) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Population standard deviation of fit residuals
pub(crate) fn residual_std(residuals: &[f64]) -> f64 {
    residuals.iter().population_std_dev()
}

/// Margin widening factor for a forecast `h` steps past `n` observations
pub(crate) fn horizon_widening(h: usize, n: usize) -> f64 {
    (1.0 + h as f64 / n.max(1) as f64).sqrt()
}

/// Replacement sigma for fits with no usable spread
///
/// Degenerate inputs (a two-point series fit exactly, a constant series, a
/// window of one) produce a residual sigma of zero or NaN; bounds built from
/// it would collapse onto the point estimate. Substitute a floor proportional
/// to the level so the intervals stay visibly open.
pub(crate) fn fallback_sigma(level: f64) -> f64 {
    (level.abs() * 0.05).max(1.0)
}

/// Sigma made safe for interval construction
pub(crate) fn effective_sigma(sigma: f64, level: f64) -> f64 {
    if sigma.is_finite() && sigma > f64::EPSILON {
        sigma
    } else {
        fallback_sigma(level)
    }
}
