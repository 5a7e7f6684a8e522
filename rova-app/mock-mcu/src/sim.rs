//! Simulated GPIO and PWM outputs that log every change.

use core::convert::Infallible;

use embedded_hal::{digital, pwm};
use rova_core::utils::{
    config::{MotorConfig, PinMap},
    controllers::{DriveGroup, Motor, MotorError, Side},
};
use tracing::trace;

pub type SimMotor = Motor<SimPin, SimPwm>;

pub struct SimPin {
    gpio: u8,
    high: bool,
}

impl SimPin {
    pub fn new(gpio: u8) -> Self {
        Self { gpio, high: false }
    }
}

impl digital::ErrorType for SimPin {
    type Error = Infallible;
}

impl digital::OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.high {
            trace!(gpio = self.gpio, "low");
        }
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high {
            trace!(gpio = self.gpio, "high");
        }
        self.high = true;
        Ok(())
    }
}

pub struct SimPwm {
    gpio: u8,
    freq: u32,
    duty: u16,
}

impl SimPwm {
    pub fn new(
        gpio: u8,
        freq: u32,
    ) -> Self {
        Self { gpio, freq, duty: 0 }
    }
}

impl pwm::ErrorType for SimPwm {
    type Error = Infallible;
}

impl pwm::SetDutyCycle for SimPwm {
    fn max_duty_cycle(&self) -> u16 {
        u16::MAX
    }

    fn set_duty_cycle(
        &mut self,
        duty: u16,
    ) -> Result<(), Self::Error> {
        if duty != self.duty {
            trace!(gpio = self.gpio, freq = self.freq, duty, "pwm");
        }
        self.duty = duty;
        Ok(())
    }
}

fn motor(config: &MotorConfig) -> Result<SimMotor, MotorError> {
    Motor::new(
        SimPin::new(config.in1),
        SimPin::new(config.in2),
        SimPwm::new(config.ena, config.pwm_freq),
        config,
    )
}

/// Build the drive train described by `pins` on simulated outputs.
pub fn drive_group(pins: &PinMap) -> Result<DriveGroup<SimMotor, 2, 2>, MotorError> {
    let left = Side::new([motor(&pins.left[0])?, motor(&pins.left[1])?]);
    let right = Side::new([motor(&pins.right[0])?, motor(&pins.right[1])?]);
    Ok(DriveGroup::new(left, right))
}
