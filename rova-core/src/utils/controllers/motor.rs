//! H-bridge motor driver.
//!
//! A [`Motor`] owns the two direction inputs and the PWM enable input of one
//! L298-style channel and turns a signed speed into pin states. Direction
//! inputs are never asserted together: the opposite input is always released
//! before the new one is driven high.

use core::cmp::Ordering;

use embedded_hal::{
    digital::{self, Error as _, OutputPin},
    pwm::{self, Error as _, SetDutyCycle},
};

use crate::utils::config::MotorConfig;

/// Largest duty magnitude; speeds are expressed on a 16-bit scale.
pub const MAX_DUTY: u16 = u16::MAX;

/// Errors raised while writing motor signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// A direction input could not be driven.
    Direction(digital::ErrorKind),
    /// The enable output rejected the new duty cycle.
    Duty(pwm::ErrorKind),
}

impl core::fmt::Display for MotorError {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        match self {
            MotorError::Direction(kind) => write!(f, "direction signal write failed: {:?}", kind),
            MotorError::Duty(kind) => write!(f, "duty cycle write failed: {:?}", kind),
        }
    }
}

/// Anything that can be driven with a signed speed on the 16-bit duty scale.
pub trait Wheel {
    /// Drive at `speed`; values beyond `±MAX_DUTY` are clamped.
    fn drive(
        &mut self,
        speed: i32,
    ) -> Result<(), MotorError>;

    /// Release both direction inputs and drop the duty to zero.
    fn stop(&mut self) -> Result<(), MotorError>;
}

/// One DC motor behind an H-bridge channel.
pub struct Motor<D, P> {
    forward: D,
    reverse: D,
    pwm: P,
    invert: bool,
    pwm_freq: u32,
    commanded: i32,
}

impl<D, P> Motor<D, P>
where
    D: OutputPin,
    P: SetDutyCycle,
{
    /// Take ownership of the channel's pins and leave the motor stopped.
    ///
    /// `pwm` must already run at `config.pwm_freq`; frequency setup is HAL
    /// specific and happens before the output is handed over.
    pub fn new(
        forward: D,
        reverse: D,
        pwm: P,
        config: &MotorConfig,
    ) -> Result<Self, MotorError> {
        let mut motor = Self {
            forward,
            reverse,
            pwm,
            invert: config.invert,
            pwm_freq: config.pwm_freq,
            commanded: 0,
        };
        motor.stop()?;
        Ok(motor)
    }

    /// Last accepted speed after clamping, before polarity inversion.
    pub fn commanded(&self) -> i32 {
        self.commanded
    }

    pub fn is_inverted(&self) -> bool {
        self.invert
    }

    pub fn pwm_freq(&self) -> u32 {
        self.pwm_freq
    }

    /// Drive the motor with a signed speed in `[-MAX_DUTY, MAX_DUTY]`.
    ///
    /// Out-of-range input is clamped rather than rejected.
    pub fn drive(
        &mut self,
        speed: i32,
    ) -> Result<(), MotorError> {
        let limit = i32::from(MAX_DUTY);
        let speed = speed.clamp(-limit, limit);
        let signed = if self.invert { -speed } else { speed };
        // |signed| <= MAX_DUTY after the clamp
        let magnitude = signed.unsigned_abs() as u16;

        match signed.cmp(&0) {
            Ordering::Greater => {
                set_low(&mut self.reverse)?;
                set_high(&mut self.forward)?;
                self.set_duty(magnitude)?;
            }
            Ordering::Less => {
                set_low(&mut self.forward)?;
                set_high(&mut self.reverse)?;
                self.set_duty(magnitude)?;
            }
            Ordering::Equal => return self.stop(),
        }

        self.commanded = speed;
        Ok(())
    }

    /// Coast: both direction inputs low, duty fully off. Idempotent.
    pub fn stop(&mut self) -> Result<(), MotorError> {
        set_low(&mut self.forward)?;
        set_low(&mut self.reverse)?;
        self.pwm
            .set_duty_cycle_fully_off()
            .map_err(|e| MotorError::Duty(e.kind()))?;
        self.commanded = 0;
        Ok(())
    }

    fn set_duty(
        &mut self,
        magnitude: u16,
    ) -> Result<(), MotorError> {
        self.pwm
            .set_duty_cycle_fraction(magnitude, MAX_DUTY)
            .map_err(|e| MotorError::Duty(e.kind()))
    }
}

impl<D, P> Wheel for Motor<D, P>
where
    D: OutputPin,
    P: SetDutyCycle,
{
    fn drive(
        &mut self,
        speed: i32,
    ) -> Result<(), MotorError> {
        Motor::drive(self, speed)
    }

    fn stop(&mut self) -> Result<(), MotorError> {
        Motor::stop(self)
    }
}

fn set_low<D: OutputPin>(pin: &mut D) -> Result<(), MotorError> {
    pin.set_low().map_err(|e| MotorError::Direction(e.kind()))
}

fn set_high<D: OutputPin>(pin: &mut D) -> Result<(), MotorError> {
    pin.set_high().map_err(|e| MotorError::Direction(e.kind()))
}
