// One-shot backfill of historical sensor readings
use std::path::PathBuf;

use chrono::{Duration, Utc};
use clap::Parser;

use farm_telemetry::application::reading_repository::ReadingRepository;
use farm_telemetry::domain::generator::SensorSimulator;
use farm_telemetry::infrastructure::file_repository::FileReadingRepository;

/// Generate a span of historical readings and replace the data file with it.
#[derive(Parser, Debug)]
#[command(name = "backfill")]
struct Args {
    /// Number of past days to cover, ending now
    #[arg(long, default_value_t = 30)]
    days: i64,

    /// Minutes between consecutive readings
    #[arg(long, default_value_t = 1)]
    interval_minutes: u32,

    /// Path to the JSON data file
    #[arg(long, default_value = "data/farm-data.json")]
    data_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let end = Utc::now();
    let start = end - Duration::days(args.days);

    let mut simulator = SensorSimulator::from_os_rng();
    let readings: Vec<_> = simulator
        .generate_range(start, end, args.interval_minutes)
        .collect();

    let repository = FileReadingRepository::new(&args.data_file);
    repository.replace_all(&readings).await?;

    println!(
        "wrote {} readings covering {} to {} into {}",
        readings.len(),
        start.format("%Y-%m-%d %H:%M"),
        end.format("%Y-%m-%d %H:%M"),
        args.data_file.display()
    );
    Ok(())
}
