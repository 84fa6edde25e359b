//! Example binding durations and timestamps, with binder tracing enabled
//!
//! Run with `RUST_LOG=envtag=trace` to see each field being bound or skipped.

use chrono::{DateTime, FixedOffset, TimeDelta};
use envtag::{Binder, EnvTag};
use std::time::Duration;

#[derive(Debug, Default, EnvTag)]
#[env(prefix = "JOB_")]
struct Schedule {
    #[env(name = "NOT_BEFORE")]
    pub not_before: DateTime<FixedOffset>,

    #[env(name = "INTERVAL")]
    pub interval: TimeDelta,

    #[env(name = "TIMEOUT")]
    pub timeout: Duration,
}

#[derive(Debug, Default, EnvTag)]
struct Config {
    #[env(name = "JOB_NAME")]
    pub name: String,

    #[env(name = "JOB_RETRIES")]
    pub retries: u8,

    pub schedule: Schedule,
}

fn init_tracing() {
    let default_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&default_level)),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Set environment variables for demonstration
    std::env::set_var("JOB_NAME", "nightly-report");
    std::env::set_var("JOB_RETRIES", "3");
    std::env::set_var("JOB_NOT_BEFORE", "2024-03-01T02:00:00+09:00");
    std::env::set_var("JOB_INTERVAL", "24h");
    std::env::set_var("JOB_TIMEOUT", "15m30s");

    let binder = Binder::new().with_time_format("%Y-%m-%dT%H:%M:%S%:z");

    let mut config = Config::default();
    binder.bind(&mut config)?;

    println!("Configuration loaded:");
    println!("  Name: {}", config.name);
    println!("  Retries: {}", config.retries);
    println!("  Not before: {}", config.schedule.not_before);
    println!("  Interval: {}", config.schedule.interval);
    println!("  Timeout: {:?}", config.schedule.timeout);

    Ok(())
}
