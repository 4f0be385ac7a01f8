use assert_approx_eq::assert_approx_eq;
use series_forecast::metrics::{accuracy, evaluate};
use series_forecast::{ForecastConfig, Forecaster, Observation, Series};

// Helper function to build a daily series
fn create_daily_series(values: Vec<f64>) -> Series {
    let start: chrono::NaiveDate = "2023-01-01".parse().unwrap();
    let observations = values
        .into_iter()
        .enumerate()
        .map(|(i, value)| Observation {
            date: start + chrono::Duration::days(i as i64),
            value,
        })
        .collect();
    Series::from_observations(observations).unwrap()
}

#[test]
fn test_accuracy_metrics() {
    let actual = vec![10.0, 20.0, 30.0, 40.0, 50.0];
    let predicted = vec![12.0, 18.0, 33.0, 37.0, 52.0];

    let metrics = accuracy(&actual, &predicted).unwrap();

    // Test MAE
    assert_approx_eq!(metrics.mae, 2.4, 0.01);

    // Test RMSE
    assert_approx_eq!(metrics.rmse, 2.449, 0.01);

    // Test MAPE (percent scale)
    assert_approx_eq!(metrics.mape.unwrap(), 10.3, 0.01);
}

#[test]
fn test_mape_skips_zero_actuals() {
    // The zero actual contributes nothing to the percentage error
    let actual = vec![0.0, 10.0];
    let predicted = vec![1.0, 11.0];

    let metrics = accuracy(&actual, &predicted).unwrap();

    assert_approx_eq!(metrics.mae, 1.0);
    assert_approx_eq!(metrics.rmse, 1.0);
    assert_approx_eq!(metrics.mape.unwrap(), 10.0);
}

#[test]
fn test_mape_undefined_when_all_actuals_zero() {
    let actual = vec![0.0, 0.0, 0.0];
    let predicted = vec![1.0, 2.0, 3.0];

    let metrics = accuracy(&actual, &predicted).unwrap();

    assert!(metrics.mape.is_none());
    assert_approx_eq!(metrics.mae, 2.0);

    // An absent mape serializes as an explicit null
    let value = serde_json::to_value(&metrics).unwrap();
    assert!(value["mape"].is_null());
}

#[test]
fn test_accuracy_error_handling() {
    // Mismatched lengths
    let actual = vec![1.0, 2.0, 3.0];
    let predicted = vec![1.0, 2.0];
    assert!(accuracy(&actual, &predicted).is_err());

    // Empty input
    let empty: Vec<f64> = vec![];
    assert!(accuracy(&empty, &empty).is_err());
}

#[test]
fn test_evaluate_short_series_returns_none() {
    // Three observations cannot support a holdout split
    let series = create_daily_series(vec![1.0, 2.0, 3.0]);
    let forecaster = Forecaster::default();
    let config = ForecastConfig::default();

    assert!(evaluate(&forecaster, &series, &config).is_none());
}

#[test]
fn test_evaluate_long_series() {
    let values = (0..30).map(|i| 100.0 + i as f64).collect();
    let series = create_daily_series(values);

    let forecaster = Forecaster::default();
    let config = ForecastConfig::default().with_periods(5);

    let metrics = evaluate(&forecaster, &series, &config).unwrap();

    // A perfect line backtests with near-zero error
    assert!(metrics.mae >= 0.0);
    assert!(metrics.mae < 0.5);
    assert!(metrics.rmse >= metrics.mae);
}

#[test]
fn test_evaluate_caps_holdout_at_fifth_of_series() {
    // Thirty points with a large horizon: the holdout is capped, not the
    // whole request length, so evaluation still runs
    let values = (0..30).map(|i| 50.0 + i as f64).collect();
    let series = create_daily_series(values);

    let forecaster = Forecaster::default();
    let config = ForecastConfig::default().with_periods(365);

    assert!(evaluate(&forecaster, &series, &config).is_some());
}

#[test]
fn test_metrics_display() {
    let actual = vec![10.0, 20.0];
    let predicted = vec![11.0, 19.0];

    let metrics = accuracy(&actual, &predicted).unwrap();
    let text = format!("{}", metrics);

    assert!(text.contains("MAE"));
    assert!(text.contains("RMSE"));
    assert!(text.contains("MAPE"));
}
