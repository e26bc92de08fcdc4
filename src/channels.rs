use crate::registers::{LedOutMode, Register};
use crate::Error;

/// One of the two motor outputs on the board. Each motor is driven by a pair
/// of PWM outputs running in antiphase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotorChannel {
    Motor1,
    Motor2,
}

impl MotorChannel {
    /// Number of motor channels on the board.
    pub const COUNT: u8 = 2;

    pub fn index(&self) -> u8 {
        match self {
            MotorChannel::Motor1 => 0,
            MotorChannel::Motor2 => 1,
        }
    }

    /// The PWM register carrying the duty byte, and the one carrying its
    /// complement.
    pub fn pwm_registers(&self) -> (Register, Register) {
        match self {
            MotorChannel::Motor1 => (Register::Pwm0, Register::Pwm1),
            MotorChannel::Motor2 => (Register::Pwm2, Register::Pwm3),
        }
    }

    /// LEDOUT pattern written after driving only this channel.
    pub fn led_out(&self) -> LedOutMode {
        match self {
            MotorChannel::Motor1 => LedOutMode::Motor1,
            MotorChannel::Motor2 => LedOutMode::Motor2,
        }
    }
}

impl TryFrom<u8> for MotorChannel {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(MotorChannel::Motor1),
            1 => Ok(MotorChannel::Motor2),
            provided => Err(Error::InvalidMotor {
                provided,
                num_motors: MotorChannel::COUNT,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips() {
        for channel in [MotorChannel::Motor1, MotorChannel::Motor2] {
            assert_eq!(MotorChannel::try_from(channel.index()).unwrap(), channel);
        }
    }

    #[test]
    fn unknown_index_is_rejected() {
        let err = MotorChannel::try_from(2).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidMotor {
                provided: 2,
                num_motors: 2
            }
        ));
    }

    #[test]
    fn channels_use_disjoint_pwm_pairs() {
        assert_eq!(
            MotorChannel::Motor1.pwm_registers(),
            (Register::Pwm0, Register::Pwm1)
        );
        assert_eq!(
            MotorChannel::Motor2.pwm_registers(),
            (Register::Pwm2, Register::Pwm3)
        );
    }
}
