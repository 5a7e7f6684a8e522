//! Speed presets shared by every drive command.
//!
//! The remote exposes a single slider, so `/speed` moves all three presets
//! together. [`SpeedState::set_presets`] is available to firmware that wants
//! independent dials.

use serde::{Deserialize, Serialize};

pub use super::motor::MAX_DUTY;

/// Lowest duty a preset may hold; below this the motors stall.
pub const MIN_DUTY: u16 = 1000;

pub const DEFAULT_FORWARD: u16 = 42_000;
pub const DEFAULT_TURN: u16 = 38_000;
pub const DEFAULT_BACK: u16 = 36_000;

/// Clamp an arbitrary requested value into `[MIN_DUTY, MAX_DUTY]`.
pub fn clamp_duty(value: i64) -> u16 {
    // within u16 range after the clamp
    value.clamp(i64::from(MIN_DUTY), i64::from(MAX_DUTY)) as u16
}

/// The three named presets: forward, turn and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PresetValues")]
pub struct SpeedState {
    forward: u16,
    turn: u16,
    back: u16,
}

/// Unchecked preset values as they appear in a board configuration file.
#[derive(Deserialize)]
struct PresetValues {
    forward: i64,
    turn: i64,
    back: i64,
}

impl From<PresetValues> for SpeedState {
    fn from(raw: PresetValues) -> Self {
        SpeedState::new(raw.forward, raw.turn, raw.back)
    }
}

impl Default for SpeedState {
    fn default() -> Self {
        Self {
            forward: DEFAULT_FORWARD,
            turn: DEFAULT_TURN,
            back: DEFAULT_BACK,
        }
    }
}

impl SpeedState {
    pub fn new(
        forward: i64,
        turn: i64,
        back: i64,
    ) -> Self {
        Self {
            forward: clamp_duty(forward),
            turn: clamp_duty(turn),
            back: clamp_duty(back),
        }
    }

    /// Set every preset to `value` (clamped) and return what was applied.
    pub fn set_speed(
        &mut self,
        value: i64,
    ) -> u16 {
        let applied = clamp_duty(value);
        *self = Self {
            forward: applied,
            turn: applied,
            back: applied,
        };
        applied
    }

    /// Set the presets independently, clamping each.
    pub fn set_presets(
        &mut self,
        forward: i64,
        turn: i64,
        back: i64,
    ) {
        *self = Self::new(forward, turn, back);
    }

    /// Value shown on the control page.
    pub fn current(&self) -> u16 {
        self.forward
    }

    pub fn forward(&self) -> u16 {
        self.forward
    }

    pub fn turn(&self) -> u16 {
        self.turn
    }

    pub fn back(&self) -> u16 {
        self.back
    }
}
