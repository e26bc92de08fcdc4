use bins::{parse_level, parse_motor, parse_seconds};
use clap::Parser;
use see3_motor::{MotorChannel, MotorDriver};
use std::{path::PathBuf, time::Duration};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Drives one motor at a fixed level for a while, then stops it
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// I2C device the motor controller sits on
    #[arg(short, long, default_value = "/dev/i2c-1")]
    device: PathBuf,

    /// Motor to drive, 0 or 1
    #[arg(short, long, default_value = "0", value_parser = parse_motor)]
    motor: MotorChannel,

    /// Level between -1.0 (full reverse) and 1.0 (full forward)
    #[arg(
        short,
        long,
        default_value = "0.5",
        allow_negative_numbers = true,
        value_parser = parse_level
    )]
    level: f32,

    /// How long to hold the level, in seconds
    #[arg(short = 't', long, default_value = "2", value_parser = parse_seconds)]
    seconds: Duration,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let channel = args.motor;
    let mut driver = MotorDriver::open(&args.device)?;

    info!(?channel, level = args.level, "driving motor");
    let driven = driver.try_control_motor(channel, args.level);
    if driven.is_ok() {
        std::thread::sleep(args.seconds);
    }

    // Stop even if the command failed partway through
    let stopped = driver.stop(channel);
    driven?;
    stopped?;
    info!(?channel, "motor stopped");
    Ok(())
}
