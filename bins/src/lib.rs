//! Argument parsers shared by the motor programs. Everything is checked
//! while parsing so a bad value never reaches the chip.

use see3_motor::{duty_cycle, MotorChannel};
use std::time::Duration;

/// Motor index, 0 or 1.
pub fn parse_motor(arg: &str) -> Result<MotorChannel, String> {
    let index: u8 = arg.parse().map_err(|e| format!("{e}"))?;
    MotorChannel::try_from(index).map_err(|e| e.to_string())
}

/// Level between -1.0 and 1.0.
pub fn parse_level(arg: &str) -> Result<f32, String> {
    let level: f32 = arg.parse().map_err(|e| format!("{e}"))?;
    match duty_cycle(level) {
        Some(_) => Ok(level),
        None => Err(format!("level {level} is outside of [-1.0, 1.0]")),
    }
}

/// Non-negative, finite number of seconds.
pub fn parse_seconds(arg: &str) -> Result<Duration, String> {
    let seconds: f32 = arg.parse().map_err(|e| format!("{e}"))?;
    Duration::try_from_secs_f32(seconds).map_err(|e| format!("{seconds} seconds: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_rejects_negative_and_nan() {
        assert!(parse_seconds("-1").is_err());
        assert!(parse_seconds("nan").is_err());
        assert!(parse_seconds("inf").is_err());
        assert!(parse_seconds("abc").is_err());
    }

    #[test]
    fn seconds_accepts_fractions() {
        assert_eq!(parse_seconds("0.25"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_seconds("0"), Ok(Duration::ZERO));
    }

    #[test]
    fn level_must_be_in_range() {
        assert_eq!(parse_level("-1"), Ok(-1.));
        assert_eq!(parse_level("0.5"), Ok(0.5));
        assert!(parse_level("1.5").is_err());
        assert!(parse_level("nan").is_err());
    }

    #[test]
    fn motor_index_must_exist() {
        assert_eq!(parse_motor("1"), Ok(MotorChannel::Motor2));
        assert!(parse_motor("2").is_err());
        assert!(parse_motor("-1").is_err());
    }
}
