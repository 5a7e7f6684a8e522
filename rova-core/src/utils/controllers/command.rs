//! Request targets understood by the controller.

use core::num::IntErrorKind;

use super::drive::Maneuver;

/// Why a `/speed` request carried no usable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedParamError {
    /// No `v=` parameter in the target.
    Missing,
    /// `v=` was present but not a decimal integer.
    Invalid,
}

impl core::fmt::Display for SpeedParamError {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        match self {
            SpeedParamError::Missing => f.write_str("missing `v` parameter"),
            SpeedParamError::Invalid => f.write_str("`v` is not an integer"),
        }
    }
}

/// One parsed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Forward,
    Back,
    Left,
    Right,
    Stop,
    /// `/speed?v=<int>`; the value is unclamped.
    SetSpeed(Result<i64, SpeedParamError>),
    /// Any other target, including `/`.
    Unknown,
}

impl Command {
    pub fn parse(target: &str) -> Self {
        if target.starts_with("/speed") {
            return Command::SetSpeed(speed_param(target));
        }
        match target {
            "/f" => Command::Forward,
            "/b" => Command::Back,
            "/l" => Command::Left,
            "/r" => Command::Right,
            "/s" => Command::Stop,
            _ => Command::Unknown,
        }
    }

    /// The drive action this command triggers, if any.
    pub fn maneuver(&self) -> Option<Maneuver> {
        match self {
            Command::Forward => Some(Maneuver::Forward),
            Command::Back => Some(Maneuver::Back),
            Command::Left => Some(Maneuver::Left),
            Command::Right => Some(Maneuver::Right),
            Command::Stop => Some(Maneuver::Stop),
            Command::SetSpeed(_) | Command::Unknown => None,
        }
    }
}

/// Value of `v=`: everything after the first `v=` up to the next `v=` or the
/// end of the target.
fn speed_param(target: &str) -> Result<i64, SpeedParamError> {
    let raw = target.split("v=").nth(1).ok_or(SpeedParamError::Missing)?;
    match raw.trim().parse::<i64>() {
        Ok(value) => Ok(value),
        // an all-digit value past i64 still clamps to the duty limits
        Err(error) => match error.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(SpeedParamError::Invalid),
        },
    }
}
