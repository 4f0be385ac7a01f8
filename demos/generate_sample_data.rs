use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Series Forecast: Sample Data Generator");
    println!("======================================\n");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_sales.csv".to_string());
    let days = 730i64;

    // Seeded so repeated runs produce the same file
    let mut rng = StdRng::seed_from_u64(42);
    let noise = Normal::new(0.0, 5.0)?;

    let start: NaiveDate = "2023-01-01".parse()?;
    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(["ds", "y"])?;

    for i in 0..days {
        let date = start + Duration::days(i);

        // Gentle upward trend
        let trend = 100.0 + 0.05 * i as f64;

        // Yearly cycle peaking mid-year
        let day_of_year = date.ordinal() as f64;
        let yearly = 10.0 * (2.0 * std::f64::consts::PI * day_of_year / 365.25).sin();

        // Weekend uplift
        let weekly = match date.weekday() {
            Weekday::Sat | Weekday::Sun => 8.0,
            _ => 0.0,
        };

        let value = (trend + yearly + weekly + noise.sample(&mut rng)).max(0.0);
        writer.write_record([
            date.format("%Y-%m-%d").to_string(),
            format!("{:.2}", value),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {} days of sample data to {}", days, path);
    println!("Load it with DataLoader::from_csv or feed it to the basic_forecast example");
    Ok(())
}
