// Perpetual sensor feed - appends one generated reading per interval
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use tokio::time::MissedTickBehavior;

use farm_telemetry::application::reading_repository::ReadingRepository;
use farm_telemetry::domain::generator::SensorSimulator;
use farm_telemetry::infrastructure::file_repository::FileReadingRepository;

/// Append one synthetic reading to the data file on a fixed interval, in
/// perpetuity. Must be the only writer of the file.
#[derive(Parser, Debug)]
#[command(name = "sensor-feed")]
struct Args {
    /// Seconds between appended readings
    #[arg(long, default_value_t = 60)]
    interval_seconds: u64,

    /// Path to the JSON data file
    #[arg(long, default_value = "data/farm-data.json")]
    data_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let repository = FileReadingRepository::new(&args.data_file);
    let mut simulator = SensorSimulator::from_os_rng();

    println!(
        "appending one reading every {}s to {} (Ctrl+C to stop)",
        args.interval_seconds,
        args.data_file.display()
    );

    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval_seconds));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately; consume it so the first append
    // lands one full interval from startup.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let reading = simulator.generate(Utc::now());
        match repository.append(reading.clone()).await {
            Ok(()) => tracing::info!("appended reading at {}", reading.time),
            Err(e) => tracing::error!("failed to append reading: {e:#}"),
        }
    }
}
