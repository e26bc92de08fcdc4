use bins::{parse_level, parse_seconds};
use clap::Parser;
use see3_motor::{MotorDriver, RegisterBus};
use std::{path::PathBuf, time::Duration, time::Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Drives both motors at once, refreshing the command periodically
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// I2C device the motor controller sits on
    #[arg(short, long, default_value = "/dev/i2c-1")]
    device: PathBuf,

    /// Level for motor 1, between -1.0 and 1.0
    #[arg(long, default_value = "0.5", allow_negative_numbers = true, value_parser = parse_level)]
    left: f32,

    /// Level for motor 2, between -1.0 and 1.0
    #[arg(long, default_value = "0.5", allow_negative_numbers = true, value_parser = parse_level)]
    right: f32,

    /// How long to keep driving, in seconds
    #[arg(short = 't', long, default_value = "2", value_parser = parse_seconds)]
    seconds: Duration,

    /// Delay between command refreshes, in milliseconds
    #[arg(long, default_value_t = 50)]
    period_ms: u64,
}

fn drive<B: RegisterBus>(driver: &mut MotorDriver<B>, args: &Args) -> see3_motor::Result {
    let period = Duration::from_millis(args.period_ms);
    let start = Instant::now();
    while start.elapsed() < args.seconds {
        driver.try_control_both_motors(args.left, args.right)?;
        std::thread::sleep(period);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let mut driver = MotorDriver::open(&args.device)?;

    info!(left = args.left, right = args.right, "driving both motors");
    let driven = drive(&mut driver, &args);

    // Stop even if a refresh failed
    let stopped = driver.stop_all();
    driven?;
    stopped?;
    info!("motors stopped");
    Ok(())
}
