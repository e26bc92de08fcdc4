use i2cdev::core::I2CDevice;

use crate::{Error, Result};

/// Write-only transport to the PWM driver chip.
///
/// The bus is already addressed to the chip; every call is one complete
/// transaction carrying `data` and nothing is read back.
pub trait RegisterBus {
    fn write(&mut self, data: &[u8]) -> Result;
}

impl<D> RegisterBus for D
where
    D: I2CDevice,
    Error: From<D::Error>,
{
    fn write(&mut self, data: &[u8]) -> Result {
        I2CDevice::write(self, data)?;
        Ok(())
    }
}
