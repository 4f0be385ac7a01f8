//! Structural model with trend changepoints and seasonal components
//!
//! Piecewise-linear trend, Fourier seasonality, and holiday indicator
//! regressors fit jointly as a ridge-penalized least-squares system. The
//! configured prior scales map to inverse squared ridge penalties, so a small
//! changepoint prior keeps the trend stiff while a large seasonality prior
//! lets the seasonal shape follow the data.

use crate::config::ForecastConfig;
use crate::error::Result;
use crate::models::{
    effective_sigma, horizon_widening, residual_std, ForecastModel, Projection,
    TrainedForecastModel, Z_95,
};
use crate::series::Series;
use chrono::{Datelike, Duration, NaiveDate};
use nalgebra::{Cholesky, DMatrix, DVector};
use statrs::statistics::Statistics;

/// Number of candidate trend changepoints
const N_CHANGEPOINTS: usize = 25;

/// Fraction of the history eligible for changepoints
const CHANGEPOINT_RANGE: f64 = 0.8;

/// Ridge penalty for the base trend columns
const TREND_PENALTY: f64 = 1e-8;

/// A Fourier seasonal component
#[derive(Debug, Clone, Copy)]
struct SeasonalBlock {
    /// Period in days
    period: f64,
    /// Number of harmonics
    order: usize,
}

/// Feature columns shared between fitting and projection
#[derive(Debug, Clone)]
struct FeatureLayout {
    /// Changepoint locations in scaled time
    changepoints: Vec<f64>,
    /// Enabled seasonal components
    seasonal: Vec<SeasonalBlock>,
    /// Fixed-date holidays as (month, day), one indicator column each
    holidays: Vec<(u32, u32)>,
}

impl FeatureLayout {
    fn column_count(&self) -> usize {
        2 + self.changepoints.len()
            + self.seasonal.iter().map(|block| 2 * block.order).sum::<usize>()
            + self.holidays.len()
    }

    /// Build the design-matrix row for one point in time
    fn feature_row(&self, t: f64, t_days: f64, date: NaiveDate) -> Vec<f64> {
        let mut row = Vec::with_capacity(self.column_count());
        row.push(t);
        row.push(1.0);
        for &changepoint in &self.changepoints {
            row.push(if t > changepoint { t - changepoint } else { 0.0 });
        }
        for block in &self.seasonal {
            for harmonic in 1..=block.order {
                let angle = 2.0 * std::f64::consts::PI * harmonic as f64 * t_days / block.period;
                row.push(angle.sin());
                row.push(angle.cos());
            }
        }
        for &(month, day) in &self.holidays {
            row.push(if date.month() == month && date.day() == day {
                1.0
            } else {
                0.0
            });
        }
        row
    }

    /// Per-column ridge penalties derived from the prior scales
    fn penalties(&self, config: &ProphetModel) -> Vec<f64> {
        let mut penalties = Vec::with_capacity(self.column_count());
        penalties.push(TREND_PENALTY);
        penalties.push(TREND_PENALTY);
        let changepoint_penalty = config.changepoint_prior_scale.powi(-2);
        penalties.extend(std::iter::repeat(changepoint_penalty).take(self.changepoints.len()));
        let seasonal_penalty = config.seasonality_prior_scale.powi(-2);
        for block in &self.seasonal {
            penalties.extend(std::iter::repeat(seasonal_penalty).take(2 * block.order));
        }
        let holiday_penalty = config.holidays_prior_scale.powi(-2);
        penalties.extend(std::iter::repeat(holiday_penalty).take(self.holidays.len()));
        penalties
    }
}

/// Structural forecasting model
#[derive(Debug, Clone)]
pub struct ProphetModel {
    /// Name of the model
    name: String,
    /// Enable the yearly seasonal component
    yearly_seasonality: bool,
    /// Enable the weekly seasonal component
    weekly_seasonality: bool,
    /// Enable the daily seasonal component
    daily_seasonality: bool,
    /// Trend changepoint flexibility
    changepoint_prior_scale: f64,
    /// Seasonal component strength
    seasonality_prior_scale: f64,
    /// Holiday component strength
    holidays_prior_scale: f64,
    /// Country code for built-in holiday dates
    country_holidays: Option<String>,
}

/// Trained structural forecasting model
#[derive(Debug, Clone)]
pub struct TrainedProphet {
    /// Name of the model
    name: String,
    /// Fitted coefficients, one per feature column
    beta: Vec<f64>,
    /// Feature columns used by the fit
    layout: FeatureLayout,
    /// First observation date
    first_date: NaiveDate,
    /// Last observation date
    last_date: NaiveDate,
    /// Days per forecast step
    step: i64,
    /// Elapsed days across the history, for time scaling
    t_scale: f64,
    /// Residual standard deviation
    sigma: f64,
    /// Number of training observations
    n: usize,
}

impl ProphetModel {
    /// Create a structural model from forecast configuration
    pub fn from_config(config: &ForecastConfig) -> Self {
        Self {
            name: "Prophet".to_string(),
            yearly_seasonality: config.yearly_seasonality,
            weekly_seasonality: config.weekly_seasonality,
            daily_seasonality: config.daily_seasonality,
            changepoint_prior_scale: config.changepoint_prior_scale,
            seasonality_prior_scale: config.seasonality_prior_scale,
            holidays_prior_scale: config.holidays_prior_scale,
            country_holidays: config.country_holidays.clone(),
        }
    }

    /// Changepoint locations over the eligible prefix of scaled time
    fn select_changepoints(&self, t_hist: &[f64]) -> Vec<f64> {
        let n = t_hist.len();
        let eligible = ((n as f64) * CHANGEPOINT_RANGE).floor() as usize;
        let count = N_CHANGEPOINTS.min(eligible.saturating_sub(1));
        let mut changepoints = Vec::with_capacity(count);
        for j in 1..=count {
            let idx = j * eligible / (count + 1);
            let location = t_hist[idx.min(n - 1)];
            if location > 0.0 && changepoints.last() != Some(&location) {
                changepoints.push(location);
            }
        }
        changepoints
    }

    fn seasonal_blocks(&self) -> Vec<SeasonalBlock> {
        let mut blocks = Vec::new();
        if self.yearly_seasonality {
            blocks.push(SeasonalBlock {
                period: 365.25,
                order: 10,
            });
        }
        if self.weekly_seasonality {
            blocks.push(SeasonalBlock {
                period: 7.0,
                order: 3,
            });
        }
        if self.daily_seasonality {
            blocks.push(SeasonalBlock {
                period: 1.0,
                order: 4,
            });
        }
        blocks
    }
}

impl ForecastModel for ProphetModel {
    type Trained = TrainedProphet;

    fn train(&self, series: &Series) -> Result<Self::Trained> {
        let first = series.first_date();
        let values = series.values();
        let n = series.len();

        let t_days: Vec<f64> = series
            .observations()
            .iter()
            .map(|obs| (obs.date - first).num_days() as f64)
            .collect();
        let t_scale = t_days[n - 1].max(1.0);
        let t_hist: Vec<f64> = t_days.iter().map(|d| d / t_scale).collect();

        let layout = FeatureLayout {
            changepoints: self.select_changepoints(&t_hist),
            seasonal: self.seasonal_blocks(),
            holidays: self
                .country_holidays
                .as_deref()
                .and_then(holiday_calendar)
                .unwrap_or_default(),
        };

        let columns = layout.column_count();
        let mut flat = Vec::with_capacity(n * columns);
        for (i, obs) in series.observations().iter().enumerate() {
            flat.extend(layout.feature_row(t_hist[i], t_days[i], obs.date));
        }
        let x = DMatrix::from_row_slice(n, columns, &flat);
        let y = DVector::from_column_slice(&values);

        let xt = x.transpose();
        let mut xtx = &xt * &x;
        let xty = &xt * &y;
        for (j, penalty) in layout.penalties(self).into_iter().enumerate() {
            xtx[(j, j)] += penalty;
        }

        let y_mean = values.iter().mean();
        let beta: Vec<f64> = match Cholesky::new(xtx) {
            Some(cholesky) => cholesky.solve(&xty).iter().copied().collect(),
            None => {
                log::debug!("structural fit is unstable, degrading to a constant projection");
                let mut beta = vec![0.0; columns];
                beta[1] = y_mean;
                beta
            }
        };

        let residuals: Vec<f64> = series
            .observations()
            .iter()
            .enumerate()
            .map(|(i, obs)| {
                let row = layout.feature_row(t_hist[i], t_days[i], obs.date);
                values[i] - dot(&row, &beta)
            })
            .collect();
        let sigma = effective_sigma(residual_std(&residuals), y_mean);

        Ok(TrainedProphet {
            name: self.name.clone(),
            beta,
            layout,
            first_date: first,
            last_date: series.last_date(),
            step: series.cadence_days(),
            t_scale,
            sigma,
            n,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedProphet {
    fn forecast(&self, horizon: usize) -> Result<Projection> {
        let mut values = Vec::with_capacity(horizon);
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);

        for k in 1..=horizon {
            let date = self.last_date + Duration::days(self.step * k as i64);
            let t_days = (date - self.first_date).num_days() as f64;
            let t = t_days / self.t_scale;
            let row = self.layout.feature_row(t, t_days, date);
            let value = dot(&row, &self.beta);
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

fn dot(row: &[f64], beta: &[f64]) -> f64 {
    row.iter().zip(beta.iter()).map(|(x, b)| x * b).sum()
}

/// Built-in fixed-date holiday calendars as (month, day) entries
fn holiday_calendar(country: &str) -> Option<Vec<(u32, u32)>> {
    match country.to_uppercase().as_str() {
        "US" => Some(vec![(1, 1), (7, 4), (11, 11), (12, 25)]),
        "GB" => Some(vec![(1, 1), (12, 25), (12, 26)]),
        "DE" => Some(vec![(1, 1), (5, 1), (10, 3), (12, 25), (12, 26)]),
        "ID" => Some(vec![(1, 1), (5, 1), (8, 17), (12, 25)]),
        _ => None,
    }
}

/// Check whether a built-in holiday calendar exists for a country code
pub fn supports_country(country: &str) -> bool {
    holiday_calendar(country).is_some()
}
