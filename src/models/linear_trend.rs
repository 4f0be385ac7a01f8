//! Linear trend model fit by ordinary least squares

use crate::error::Result;
use crate::models::{
    effective_sigma, horizon_widening, residual_std, ForecastModel, Projection,
    TrainedForecastModel, Z_95,
};
use crate::series::Series;
use statrs::statistics::Statistics;

/// Linear trend model
///
/// Regresses the observed values against elapsed calendar days since the
/// first observation and projects the fitted line forward.
#[derive(Debug, Clone)]
pub struct LinearTrend {
    /// Name of the model
    name: String,
}

/// Trained linear trend model
#[derive(Debug, Clone)]
pub struct TrainedLinearTrend {
    /// Name of the model
    name: String,
    /// Fitted slope per day
    slope: f64,
    /// Fitted intercept
    intercept: f64,
    /// Residual standard deviation
    sigma: f64,
    /// Number of training observations
    n: usize,
    /// Elapsed days of the last observation
    last_x: f64,
    /// Days per forecast step
    step: f64,
}

impl LinearTrend {
    /// Create a new linear trend model
    pub fn new() -> Self {
        Self {
            name: "Linear Trend".to_string(),
        }
    }
}

impl Default for LinearTrend {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastModel for LinearTrend {
    type Trained = TrainedLinearTrend;

    fn train(&self, series: &Series) -> Result<Self::Trained> {
        let first = series.first_date();
        let xs: Vec<f64> = series
            .observations()
            .iter()
            .map(|obs| (obs.date - first).num_days() as f64)
            .collect();
        let ys = series.values();

        let x_mean = xs.iter().mean();
        let y_mean = ys.iter().mean();

        let sxx: f64 = xs.iter().map(|x| (x - x_mean).powi(2)).sum();
        let sxy: f64 = xs
            .iter()
            .zip(ys.iter())
            .map(|(x, y)| (x - x_mean) * (y - y_mean))
            .sum();

        let mut slope = sxy / sxx;
        let mut intercept = y_mean - slope * x_mean;
        if !slope.is_finite() || !intercept.is_finite() {
            log::debug!("linear trend fit is unstable, degrading to a constant projection");
            slope = 0.0;
            intercept = y_mean;
        }

        let residuals: Vec<f64> = xs
            .iter()
            .zip(ys.iter())
            .map(|(x, y)| y - (slope * x + intercept))
            .collect();
        let sigma = effective_sigma(residual_std(&residuals), y_mean);

        Ok(TrainedLinearTrend {
            name: self.name.clone(),
            slope,
            intercept,
            sigma,
            n: series.len(),
            last_x: xs[xs.len() - 1],
            step: series.cadence_days() as f64,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedLinearTrend {
    fn forecast(&self, horizon: usize) -> Result<Projection> {
        let mut values = Vec::with_capacity(horizon);
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);

        for k in 1..=horizon {
            let x = self.last_x + self.step * k as f64;
            let value = self.intercept + self.slope * x;
            let margin = Z_95 * self.sigma * horizon_widening(k, self.n);
            values.push(value);
            lower.push(value - margin);
            upper.push(value + margin);
        }

        Projection::new(values, lower, upper)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
