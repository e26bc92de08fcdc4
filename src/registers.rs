/// Fixed 7-bit bus address of the PWM driver chip.
pub const CHIP_ADDRESS: u16 = 0x62;

/// MODE1 value that wakes the oscillator and selects normal operation.
pub const MODE1_NORMAL: u8 = 0x00;

/// LEDOUT pattern with every output in individual-PWM mode.
const LEDOUT_ALL_PWM: u8 = 0xAA;

macro_rules! register_map {
    ($($(#[$meta:meta])* $name:ident = $addr:literal,)*) => {
        /// Registers of the PWM driver chip, by name.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Register {
            $($(#[$meta])* $name,)*
        }

        impl Register {
            /// Every register in address order.
            pub const ALL: &'static [Register] = &[$(Register::$name,)*];

            /// Address of this register on the chip.
            pub fn address(&self) -> u8 {
                match self {
                    $(Register::$name => $addr,)*
                }
            }
        }
    };
}

register_map! {
    /// Oscillator, sleep and auto-increment control.
    Mode1 = 0x00,
    /// Output driver configuration.
    Mode2 = 0x01,
    Pwm0 = 0x02,
    Pwm1 = 0x03,
    Pwm2 = 0x04,
    Pwm3 = 0x05,
    /// Group duty cycle.
    GrpPwm = 0x06,
    /// Group blink frequency.
    GrpFreq = 0x07,
    /// Per-output driver state (off, on, PWM, group PWM), two bits each.
    LedOut = 0x08,
}

/// Output-mode pattern written to LEDOUT at the end of every control sequence.
///
/// Each pattern rewrites the whole register, so driving one motor also
/// changes the output mode of the other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedOutMode {
    Motor1,
    Motor2,
    Both,
}

impl LedOutMode {
    pub fn value(&self) -> u8 {
        match self {
            LedOutMode::Motor1 => LEDOUT_ALL_PWM ^ 0xF0,
            LedOutMode::Motor2 => LEDOUT_ALL_PWM ^ 0x0F,
            LedOutMode::Both => LEDOUT_ALL_PWM ^ 0x00,
        }
    }
}

/// A single register write, the only transaction the chip ever receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWrite {
    pub register: Register,
    pub value: u8,
}

impl RegisterWrite {
    pub fn new(register: Register, value: u8) -> RegisterWrite {
        RegisterWrite { register, value }
    }

    /// Bus payload: register address followed by the value.
    pub fn encode(&self) -> [u8; 2] {
        [self.register.address(), self.value]
    }
}

/// Maps a velocity level in [-1.0, 1.0] to a PWM duty byte.
///
/// The product is truncated, not rounded, so `0.0` lands on 127. Returns
/// `None` for levels outside the range and for non-finite values.
pub fn duty_cycle(level: f32) -> Option<u8> {
    if !level.is_finite() || level.abs() > 1. {
        return None;
    }
    Some(((level + 1.) / 2. * 255.) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_addresses_are_contiguous() {
        for (expected, register) in Register::ALL.iter().enumerate() {
            assert_eq!(register.address(), expected as u8, "{register:?}");
        }
        assert_eq!(Register::LedOut.address(), 0x08);
    }

    #[test]
    fn ledout_patterns() {
        assert_eq!(LedOutMode::Motor1.value(), 0x5A);
        assert_eq!(LedOutMode::Motor2.value(), 0xA5);
        assert_eq!(LedOutMode::Both.value(), 0xAA);
    }

    #[test]
    fn duty_cycle_endpoints() {
        assert_eq!(duty_cycle(-1.), Some(0));
        assert_eq!(duty_cycle(0.), Some(127));
        assert_eq!(duty_cycle(0.5), Some(191));
        assert_eq!(duty_cycle(1.), Some(255));
    }

    #[test]
    fn duty_cycle_rejects_bad_levels() {
        assert_eq!(duty_cycle(1.0001), None);
        assert_eq!(duty_cycle(-3.), None);
        assert_eq!(duty_cycle(f32::NAN), None);
        assert_eq!(duty_cycle(f32::INFINITY), None);
    }

    #[test]
    fn write_encodes_address_then_value() {
        let write = RegisterWrite::new(Register::Pwm3, 0x40);
        assert_eq!(write.encode(), [0x05, 0x40]);
    }
}
