//! Single exponential smoothing model

use crate::error::{ForecastError, Result};
use crate::models::{
    effective_sigma, horizon_widening, residual_std, ForecastModel, Projection,
    TrainedForecastModel, Z_95,
};
use crate::series::Series;

/// Default smoothing factor
pub const DEFAULT_ALPHA: f64 = 0.3;

/// Single exponential smoothing model
///
/// Smooths the series with a fixed factor and propagates the final level flat
/// across the horizon.
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    /// Name of the model
    name: String,
    /// Smoothing factor
    alpha: f64,
}

/// Trained single exponential smoothing model
#[derive(Debug, Clone)]
pub struct TrainedExponentialSmoothing {
    /// Name of the model
    name: String,
    /// Final smoothed level
    level: f64,
    /// Residual standard deviation
    sigma: f64,
    /// Number of training observations
    n: usize,
}

impl ExponentialSmoothing {
    /// Create a new exponential smoothing model
    pub fn new(alpha: f64) -> Result<Self> {
        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Alpha must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Exponential Smoothing (alpha={})", alpha),
            alpha,
        })
    }
}

impl Default for ExponentialSmoothing {
    fn default() -> Self {
        Self {
            name: format!("Exponential Smoothing (alpha={})", DEFAULT_ALPHA),
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl ForecastModel for ExponentialSmoothing {
    type Trained = TrainedExponentialSmoothing;

    fn train(&self, series: &Series) -> Result<Self::Trained> {
        let values = series.values();

        let mut level = values[0];
        let mut residuals = Vec::with_capacity(values.len());
        residuals.push(0.0);
        for &value in &values[1..] {
            level = self.alpha * value + (1.0 - self.alpha) * level;
            residuals.push(value - level);
        }

        let sigma = effective_sigma(residual_std(&residuals), level);

        Ok(TrainedExponentialSmoothing {
            name: self.name.clone(),
            level,
            sigma,
            n: series.len(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedExponentialSmoothing {
    fn forecast(&self, horizon: usize) -> Result<Projection> {
        let values = vec![self.level; horizon];
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);

        for k in 1..=horizon {
            let margin = Z_95 * self.sigma * horizon_widening(k, self.n);
            lower.push(self.level - margin);
            upper.push(self.level + margin);
        }

        Projection::new(values, lower, upper)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
