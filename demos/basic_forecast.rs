use chrono::{Datelike, Duration, NaiveDate};
use series_forecast::{
    generate_forecast, DataPoint, ForecastConfig, ForecastMethod, ForecastRequest, Forecaster,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Series Forecast: Basic Forecasting Example");
    println!("==========================================\n");

    // Create sample data
    println!("Creating sample data...");
    let data = create_sample_data();
    println!("Sample data created: {} daily points\n", data.len());

    let forecaster = Forecaster::default();
    let engine = forecaster.engine();
    println!(
        "Advanced engine '{}': {}\n",
        engine.engine,
        if engine.available {
            "available"
        } else {
            "unavailable"
        }
    );

    // Forecast with each method and compare
    for method in [
        ForecastMethod::LinearTrend,
        ForecastMethod::MovingAverage,
        ForecastMethod::ExponentialSmoothing,
        ForecastMethod::Prophet,
    ] {
        println!("Forecasting with {}...", method);

        let request = ForecastRequest {
            data: data.clone(),
            config: ForecastConfig::default()
                .with_periods(14)
                .with_method(method),
        };
        let response = generate_forecast(&forecaster, &request)?;

        println!("First 5 of {} forecast points:", response.forecast.len());
        for point in response.forecast.iter().take(5) {
            println!(
                "  {}: {:8.2}  [{:8.2}, {:8.2}]",
                point.date, point.value, point.lower, point.upper
            );
        }

        if let Some(metrics) = &response.metrics {
            println!("{}", metrics);
        }
        for warning in &response.warnings {
            println!("  warning: {}", warning);
        }
        println!();
    }

    println!("Forecasting complete!");
    Ok(())
}

/// Create 90 days of sales-like data with a trend and weekly seasonality
fn create_sample_data() -> Vec<DataPoint> {
    let start: NaiveDate = "2023-01-01".parse().unwrap();
    let mut data = Vec::with_capacity(90);

    let mut value = 100.0;
    let trend = 0.3;

    for i in 0..90 {
        let date = start + Duration::days(i);

        // Weekend uplift plus deterministic wobble standing in for noise
        let day_of_week = date.weekday().num_days_from_monday() as f64;
        let weekly = (day_of_week * std::f64::consts::PI / 7.0).sin() * 4.0;
        let wobble = (i as f64 * 0.7).sin() * 2.0;

        value += trend;
        data.push(DataPoint::new(
            date.format("%Y-%m-%d").to_string(),
            value + weekly + wobble,
        ));
    }

    data
}
