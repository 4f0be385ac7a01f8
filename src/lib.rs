//! # Series Forecast
//!
//! A Rust library for forecasting timestamped numeric series with uncertainty
//! bounds and backtested accuracy metrics.
//!
//! ## Features
//!
//! - Series validation and normalization (ordering, duplicate collapsing,
//!   cadence inference)
//! - Forecasting methods: linear trend, moving average, exponential
//!   smoothing, and an optional structural model behind the `prophet` feature
//! - Mandatory fallback: requests for the structural model never fail when
//!   the engine is unavailable, they degrade to the linear trend with a
//!   warning
//! - Holdout backtesting with MAE, RMSE, and zero-guarded MAPE
//! - JSON request/response contract for chart-rendering clients
//! - CSV ingestion for two-column spreadsheet exports
//!
//! ## Quick Start
//!
//! ```rust
//! use series_forecast::{DataPoint, ForecastConfig, Forecaster, Series};
//!
//! # fn main() -> series_forecast::Result<()> {
//! let data = vec![
//!     DataPoint::new("2023-01-01", 10.0),
//!     DataPoint::new("2023-01-02", 12.0),
//!     DataPoint::new("2023-01-03", 11.0),
//!     DataPoint::new("2023-01-04", 13.0),
//! ];
//! let series = Series::parse(&data)?;
//!
//! let config = ForecastConfig::default().with_periods(7);
//! let forecaster = Forecaster::default();
//! let run = forecaster.forecast(&series, &config)?;
//!
//! assert_eq!(run.points.len(), 7);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod forecaster;
pub mod loader;
pub mod metrics;
pub mod models;
pub mod series;

// Re-export commonly used types
pub use crate::api::{generate_forecast, ForecastRequest, ForecastResponse};
pub use crate::config::{ForecastConfig, ForecastMethod};
pub use crate::engine::EngineStatus;
pub use crate::error::{ForecastError, Result};
pub use crate::forecaster::{ForecastPoint, ForecastRun, Forecaster};
pub use crate::loader::DataLoader;
pub use crate::metrics::{evaluate, ForecastMetrics};
pub use crate::models::{ForecastModel, Projection, TrainedForecastModel};
pub use crate::series::{DataPoint, Observation, Series};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
