use series_forecast::{
    EngineStatus, ForecastConfig, ForecastError, ForecastMethod, Forecaster, Observation, Series,
};

// Helper function to create test data
fn create_test_data() -> Series {
    let start: chrono::NaiveDate = "2023-01-01".parse().unwrap();
    let observations = (0..20)
        .map(|i| Observation {
            date: start + chrono::Duration::days(i),
            value: 100.0 + i as f64 + if i % 2 == 0 { 1.5 } else { -1.5 },
        })
        .collect();
    Series::from_observations(observations).unwrap()
}

#[test]
fn test_forecast_horizon_and_dates() {
    let series = create_test_data();
    let forecaster = Forecaster::default();
    let config = ForecastConfig::default().with_periods(5);

    let run = forecaster.forecast(&series, &config).unwrap();

    // Exactly the requested number of points
    assert_eq!(run.points.len(), 5);

    // Dates continue the series at its daily cadence
    let mut expected = series.last_date();
    for point in &run.points {
        expected += chrono::Duration::days(1);
        assert_eq!(point.date, expected);
    }
}

#[test]
fn test_forecast_all_plain_methods() {
    let series = create_test_data();
    let forecaster = Forecaster::default();

    for method in [
        ForecastMethod::LinearTrend,
        ForecastMethod::MovingAverage,
        ForecastMethod::ExponentialSmoothing,
    ] {
        let config = ForecastConfig::default().with_periods(4).with_method(method);
        let run = forecaster.forecast(&series, &config).unwrap();

        assert_eq!(run.method, method);
        assert_eq!(run.points.len(), 4);
        assert!(run.warnings.is_empty());

        for point in &run.points {
            assert!(point.value.is_finite());
            assert!(point.lower <= point.value);
            assert!(point.value <= point.upper);
        }
    }
}

#[test]
fn test_forecast_is_deterministic() {
    let series = create_test_data();
    let forecaster = Forecaster::default();
    let config = ForecastConfig::default().with_periods(6);

    let first = forecaster.forecast(&series, &config).unwrap();
    let second = forecaster.forecast(&series, &config).unwrap();

    assert_eq!(first.points, second.points);
}

#[test]
fn test_prophet_falls_back_when_engine_unavailable() {
    let series = create_test_data();
    let forecaster = Forecaster::new(EngineStatus::disabled("engine not installed"));
    let config = ForecastConfig::default()
        .with_periods(5)
        .with_method(ForecastMethod::Prophet);

    let run = forecaster.forecast(&series, &config).unwrap();

    // The run degrades to the trend baseline and says so
    assert_eq!(run.method, ForecastMethod::LinearTrend);
    assert!(!run.warnings.is_empty());
    assert!(run.warnings[0].contains("fell back to linear_trend"));

    // The fallback output matches a direct linear trend run
    let linear_config = ForecastConfig::default().with_periods(5);
    let linear = forecaster.forecast(&series, &linear_config).unwrap();
    assert_eq!(run.points, linear.points);
}

#[test]
fn test_zero_periods_rejected() {
    let series = create_test_data();
    let forecaster = Forecaster::default();
    let config = ForecastConfig::default().with_periods(0);

    let result = forecaster.forecast(&series, &config);
    assert!(matches!(
        result.unwrap_err(),
        ForecastError::InvalidParameter(_)
    ));
}

#[test]
fn test_invalid_prior_scale_rejected() {
    let series = create_test_data();
    let forecaster = Forecaster::default();

    let mut config = ForecastConfig::default();
    config.changepoint_prior_scale = -1.0;

    let result = forecaster.forecast(&series, &config);
    assert!(matches!(
        result.unwrap_err(),
        ForecastError::InvalidParameter(_)
    ));
}

#[test]
fn test_forecast_weekly_series() {
    // Weekly cadence is preserved in the forecast dates
    let start: chrono::NaiveDate = "2023-01-02".parse().unwrap();
    let observations = (0..10)
        .map(|i| Observation {
            date: start + chrono::Duration::weeks(i),
            value: 50.0 + i as f64,
        })
        .collect();
    let series = Series::from_observations(observations).unwrap();

    let forecaster = Forecaster::default();
    let config = ForecastConfig::default().with_periods(3);
    let run = forecaster.forecast(&series, &config).unwrap();

    let mut expected = series.last_date();
    for point in &run.points {
        expected += chrono::Duration::weeks(1);
        assert_eq!(point.date, expected);
    }
}
