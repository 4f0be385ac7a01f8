//! Trailing moving average baseline

use crate::error::{ForecastError, Result};
use crate::models::{effective_sigma, ForecastModel, Projection, TrainedForecastModel, Z_95};
use crate::series::Series;
use statrs::statistics::Statistics;

/// Default trailing window size
pub const DEFAULT_WINDOW: usize = 7;

/// Moving average model
///
/// Projects the mean of the trailing window at every future step. Encodes no
/// trend or seasonality; a deliberately naive baseline.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    /// Name of the model
    name: String,
    /// Window size
    window: usize,
}

/// Trained moving average model
#[derive(Debug, Clone)]
pub struct TrainedMovingAverage {
    /// Name of the model
    name: String,
    /// Mean of the trailing window
    mean: f64,
    /// Standard deviation of the trailing window
    sigma: f64,
}

impl MovingAverage {
    /// Create a new moving average model
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Moving Average (window={})", window),
            window,
        })
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self {
            name: format!("Moving Average (window={})", DEFAULT_WINDOW),
            window: DEFAULT_WINDOW,
        }
    }
}

impl ForecastModel for MovingAverage {
    type Trained = TrainedMovingAverage;

    fn train(&self, series: &Series) -> Result<Self::Trained> {
        let values = series.values();
        let width = self.window.min(values.len());
        let window = &values[values.len() - width..];

        let mean = window.iter().mean();
        // Sample standard deviation; a window of one yields NaN and takes
        // the sigma floor instead.
        let sigma = effective_sigma(window.iter().std_dev(), mean);

        Ok(TrainedMovingAverage {
            name: self.name.clone(),
            mean,
            sigma,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedMovingAverage {
    fn forecast(&self, horizon: usize) -> Result<Projection> {
        Ok(Projection::constant(
            self.mean,
            Z_95 * self.sigma,
            horizon,
        ))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
