use pretty_assertions::assert_eq;
use series_forecast::{
    generate_forecast, DataPoint, EngineStatus, ForecastConfig, ForecastMethod, ForecastRequest,
    Forecaster,
};

// Helper function to build a request with a daily series
fn create_request(days: usize) -> ForecastRequest {
    let start: chrono::NaiveDate = "2023-01-01".parse().unwrap();
    let data = (0..days)
        .map(|i| {
            let date = start + chrono::Duration::days(i as i64);
            DataPoint::new(date.format("%Y-%m-%d").to_string(), 100.0 + i as f64)
        })
        .collect();

    ForecastRequest {
        data,
        config: ForecastConfig::default().with_periods(5),
    }
}

#[test]
fn test_generate_forecast_response() {
    let forecaster = Forecaster::default();
    let request = create_request(20);

    let response = generate_forecast(&forecaster, &request).unwrap();

    assert_eq!(response.historical.len(), 20);
    assert_eq!(response.forecast.len(), 5);
    assert!(response.metrics.is_some());

    // Historical dates are echoed back in normalized form
    assert_eq!(response.historical[0].ds, "2023-01-01");
    assert_eq!(response.historical[0].y, 100.0);
}

#[test]
fn test_response_wire_keys() {
    let forecaster = Forecaster::default();
    let request = create_request(20);

    let response = generate_forecast(&forecaster, &request).unwrap();
    let value = serde_json::to_value(&response).unwrap();

    // Forecast points use the ds/yhat naming
    let point = value["forecast"][0].as_object().unwrap();
    let mut keys: Vec<&str> = point.keys().map(|k| k.as_str()).collect();
    keys.sort();
    assert_eq!(keys, vec!["ds", "yhat", "yhat_lower", "yhat_upper"]);

    // Historical points use the ds/y naming
    let point = value["historical"][0].as_object().unwrap();
    let mut keys: Vec<&str> = point.keys().map(|k| k.as_str()).collect();
    keys.sort();
    assert_eq!(keys, vec!["ds", "y"]);

    // Dates serialize as plain YYYY-MM-DD strings
    assert_eq!(value["forecast"][0]["ds"], "2023-01-21");
}

#[test]
fn test_metrics_null_for_short_series() {
    let forecaster = Forecaster::default();
    let request = create_request(3);

    let response = generate_forecast(&forecaster, &request).unwrap();
    assert!(response.metrics.is_none());

    // The key is still present, as an explicit null
    let value = serde_json::to_value(&response).unwrap();
    assert!(value.as_object().unwrap().contains_key("metrics"));
    assert!(value["metrics"].is_null());
}

#[test]
fn test_warnings_omitted_when_empty() {
    let forecaster = Forecaster::default();
    let request = create_request(20);

    let response = generate_forecast(&forecaster, &request).unwrap();
    assert!(response.warnings.is_empty());

    let value = serde_json::to_value(&response).unwrap();
    assert!(!value.as_object().unwrap().contains_key("warnings"));
}

#[test]
fn test_warnings_present_on_fallback() {
    let forecaster = Forecaster::new(EngineStatus::disabled("engine not installed"));
    let mut request = create_request(20);
    request.config = request.config.with_method(ForecastMethod::Prophet);

    let response = generate_forecast(&forecaster, &request).unwrap();
    assert!(!response.warnings.is_empty());

    let value = serde_json::to_value(&response).unwrap();
    let warnings = value["warnings"].as_array().unwrap();
    assert!(warnings[0]
        .as_str()
        .unwrap()
        .contains("fell back to linear_trend"));
}

#[test]
fn test_request_deserializes_with_default_config() {
    let raw = r#"{
        "data": [
            {"ds": "2023-01-01", "y": 1.0},
            {"ds": "2023-01-02", "y": 2.0}
        ]
    }"#;

    let request: ForecastRequest = serde_json::from_str(raw).unwrap();

    assert_eq!(request.data.len(), 2);
    assert_eq!(request.config, ForecastConfig::default());
    assert_eq!(request.config.periods, 30);
}

#[test]
fn test_config_defaults_from_empty_object() {
    let config: ForecastConfig = serde_json::from_str("{}").unwrap();

    assert_eq!(config.periods, 30);
    assert!(config.yearly_seasonality);
    assert!(config.weekly_seasonality);
    assert!(!config.daily_seasonality);
    assert_eq!(config.changepoint_prior_scale, 0.05);
    assert_eq!(config.seasonality_prior_scale, 10.0);
    assert_eq!(config.holidays_prior_scale, 10.0);
    assert_eq!(config.country_holidays, None);
    assert_eq!(config.forecast_method, ForecastMethod::LinearTrend);
}

#[test]
fn test_unknown_method_rejected() {
    let raw = r#"{"forecast_method": "arima"}"#;

    let result: Result<ForecastConfig, _> = serde_json::from_str(raw);
    let message = result.unwrap_err().to_string();

    assert!(message.contains("Unsupported forecast method"));
    assert!(message.contains("arima"));
}

#[test]
fn test_method_serializes_as_wire_name() {
    let json = serde_json::to_string(&ForecastMethod::ExponentialSmoothing).unwrap();
    assert_eq!(json, "\"exponential_smoothing\"");

    let method: ForecastMethod = serde_json::from_str("\"moving_average\"").unwrap();
    assert_eq!(method, ForecastMethod::MovingAverage);
}

#[test]
fn test_engine_status_serialization() {
    let value = serde_json::to_value(EngineStatus::disabled("engine not installed")).unwrap();
    assert_eq!(value["available"], false);
    assert_eq!(value["engine"], "prophet");
    assert_eq!(value["detail"], "engine not installed");

    // No detail key when the engine is operational
    let value = serde_json::to_value(EngineStatus::enabled()).unwrap();
    assert_eq!(value["available"], true);
    assert!(!value.as_object().unwrap().contains_key("detail"));
}
