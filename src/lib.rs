use crate::registers::{RegisterWrite, MODE1_NORMAL};
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};
use std::path::Path;
use tracing::{debug, trace};

mod bus;
mod channels;
mod registers;

pub use crate::bus::RegisterBus;
pub use crate::channels::MotorChannel;
pub use crate::registers::{duty_cycle, LedOutMode, Register, CHIP_ADDRESS};

/// Driver for the two DC motor outputs of the board's PWM driver chip.
///
/// Each motor is driven differentially: one PWM output carries the duty byte
/// and its partner carries the bitwise complement. A driver only exists once
/// the chip has been taken out of sleep, see [`MotorDriver::initialize`].
#[derive(Debug)]
pub struct MotorDriver<B = LinuxI2CDevice> {
    bus: B,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I2C error: {0}")]
    I2c(#[from] LinuxI2CError),
    #[error("bus error: {0}")]
    Bus(String),
    #[error("level provided outside of [-1.0, 1.0] range, value: {0}")]
    InvalidLevel(f32),
    #[error("motor index {provided} out of range, board has {num_motors} motors")]
    InvalidMotor { provided: u8, num_motors: u8 },
}

pub type Result<T = (), E = Error> = std::result::Result<T, E>;

impl MotorDriver<LinuxI2CDevice> {
    /// Opens the chip on the given I2C character device (e.g. `/dev/i2c-1`)
    /// and initializes it.
    pub fn open<P: AsRef<Path>>(device: P) -> Result<MotorDriver<LinuxI2CDevice>> {
        let bus = LinuxI2CDevice::new(device, CHIP_ADDRESS)?;
        MotorDriver::initialize(bus)
    }
}

impl<B: RegisterBus> MotorDriver<B> {
    /// Takes ownership of the bus and writes MODE1 so the chip leaves its
    /// sleep default. Must happen before any motor can be driven.
    pub fn initialize(bus: B) -> Result<MotorDriver<B>> {
        let mut driver = MotorDriver { bus };
        driver.reinitialize()?;
        debug!("motor controller initialized");
        Ok(driver)
    }

    /// Re-issues the MODE1 write. Harmless to repeat.
    pub fn reinitialize(&mut self) -> Result {
        self.write_register(RegisterWrite::new(Register::Mode1, MODE1_NORMAL))
    }

    /// Gives the underlying bus back.
    pub fn release(self) -> B {
        self.bus
    }

    /// Drives a single motor at `level`, from -1.0 (full reverse) to 1.0
    /// (full forward).
    ///
    /// Out-of-range levels are dropped without touching the chip and without
    /// an error. Only bus failures are reported. The LEDOUT write at the end
    /// replaces the output mode of both motors.
    pub fn control_motor(&mut self, channel: MotorChannel, level: f32) -> Result {
        drop_invalid(self.try_control_motor(channel, level))
    }

    /// Like [`MotorDriver::control_motor`], addressed by motor index. Unknown
    /// indices are dropped the same way out-of-range levels are.
    pub fn control_motor_index(&mut self, index: u8, level: f32) -> Result {
        let result = MotorChannel::try_from(index)
            .and_then(|channel| self.try_control_motor(channel, level));
        drop_invalid(result)
    }

    /// Drives both motors with one LEDOUT write enabling both PWM pairs.
    /// Nothing is written unless both levels are in range.
    pub fn control_both_motors(&mut self, level1: f32, level2: f32) -> Result {
        drop_invalid(self.try_control_both_motors(level1, level2))
    }

    /// Strict form of [`MotorDriver::control_motor`]: an out-of-range level
    /// is returned as [`Error::InvalidLevel`].
    pub fn try_control_motor(&mut self, channel: MotorChannel, level: f32) -> Result {
        let writes = motor_sequence(channel, level)?;
        self.write_sequence(&writes)
    }

    /// Strict form of [`MotorDriver::control_both_motors`].
    pub fn try_control_both_motors(&mut self, level1: f32, level2: f32) -> Result {
        let writes = dual_sequence(level1, level2)?;
        self.write_sequence(&writes)
    }

    /// Holds one motor stopped (level 0.0).
    pub fn stop(&mut self, channel: MotorChannel) -> Result {
        self.try_control_motor(channel, 0.)
    }

    /// Holds both motors stopped.
    pub fn stop_all(&mut self) -> Result {
        self.try_control_both_motors(0., 0.)
    }

    fn write_sequence(&mut self, writes: &[RegisterWrite]) -> Result {
        for write in writes {
            self.write_register(*write)?;
        }
        Ok(())
    }

    fn write_register(&mut self, write: RegisterWrite) -> Result {
        trace!(
            register = ?write.register,
            value = write.value,
            "writing register"
        );
        self.bus.write(&write.encode())
    }
}

fn drop_invalid(result: Result) -> Result {
    match result {
        Err(Error::InvalidLevel(level)) => {
            debug!(requested = level, "dropping motor command with out-of-range level");
            Ok(())
        }
        Err(Error::InvalidMotor { provided, .. }) => {
            debug!(motor = provided, "dropping motor command for unknown motor");
            Ok(())
        }
        other => other,
    }
}

fn checked_duty(level: f32) -> Result<u8> {
    duty_cycle(level).ok_or(Error::InvalidLevel(level))
}

fn motor_sequence(channel: MotorChannel, level: f32) -> Result<[RegisterWrite; 3]> {
    let duty = checked_duty(level)?;
    let (pwm, pwm_complement) = channel.pwm_registers();
    Ok([
        RegisterWrite::new(pwm, duty),
        RegisterWrite::new(pwm_complement, !duty),
        RegisterWrite::new(Register::LedOut, channel.led_out().value()),
    ])
}

fn dual_sequence(level1: f32, level2: f32) -> Result<[RegisterWrite; 5]> {
    let duty1 = checked_duty(level1)?;
    let duty2 = checked_duty(level2)?;
    Ok([
        RegisterWrite::new(Register::Pwm0, duty1),
        RegisterWrite::new(Register::Pwm1, !duty1),
        RegisterWrite::new(Register::Pwm2, duty2),
        RegisterWrite::new(Register::Pwm3, !duty2),
        RegisterWrite::new(Register::LedOut, LedOutMode::Both.value()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motor1_sequence_at_half_speed() {
        let writes = motor_sequence(MotorChannel::Motor1, 0.5).unwrap();
        let encoded: Vec<[u8; 2]> = writes.iter().map(RegisterWrite::encode).collect();
        assert_eq!(encoded, vec![[0x02, 191], [0x03, 64], [0x08, 0x5A]]);
    }

    #[test]
    fn dual_sequence_rejects_either_level() {
        assert!(matches!(
            dual_sequence(0.2, -1.5),
            Err(Error::InvalidLevel(l)) if l == -1.5
        ));
        assert!(matches!(
            dual_sequence(2., 0.),
            Err(Error::InvalidLevel(l)) if l == 2.
        ));
    }

    #[test]
    fn drop_invalid_keeps_bus_errors() {
        assert!(drop_invalid(Err(Error::InvalidLevel(4.))).is_ok());
        assert!(matches!(
            drop_invalid(Err(Error::Bus("nack".into()))),
            Err(Error::Bus(_))
        ));
    }
}
