//! Left/right motor grouping for skid-steer driving.
//!
//! Each maneuver is a pair of signed speeds, one per side, taken from the
//! current [`SpeedState`]. Turns pivot in place: the sides spin in opposite
//! directions at the turn preset.

use serde::{Deserialize, Serialize};

use super::{
    motor::{MotorError, Wheel},
    speed::SpeedState,
};

/// High-level drive intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Maneuver {
    Forward,
    Back,
    Left,
    Right,
    Stop,
}

impl Maneuver {
    /// Signed `(left, right)` speeds for this maneuver.
    pub fn side_speeds(
        self,
        speeds: &SpeedState,
    ) -> (i32, i32) {
        let forward = i32::from(speeds.forward());
        let turn = i32::from(speeds.turn());
        let back = i32::from(speeds.back());
        match self {
            Maneuver::Forward => (forward, forward),
            Maneuver::Back => (-back, -back),
            Maneuver::Left => (-turn, turn),
            Maneuver::Right => (turn, -turn),
            Maneuver::Stop => (0, 0),
        }
    }
}

/// Motors physically on the same side of the chassis.
pub struct Side<M, const N: usize> {
    motors: [M; N],
}

impl<M: Wheel, const N: usize> Side<M, N> {
    pub fn new(motors: [M; N]) -> Self {
        const { assert!(N > 0, "a side needs at least one motor") };
        Self { motors }
    }

    /// Drive every motor at `speed`. All motors are written even if one fails;
    /// the first failure is returned.
    pub fn drive(
        &mut self,
        speed: i32,
    ) -> Result<(), MotorError> {
        self.for_each(|motor| motor.drive(speed))
    }

    pub fn stop(&mut self) -> Result<(), MotorError> {
        self.for_each(|motor| motor.stop())
    }

    fn for_each(
        &mut self,
        mut op: impl FnMut(&mut M) -> Result<(), MotorError>,
    ) -> Result<(), MotorError> {
        let mut result = Ok(());
        for (index, motor) in self.motors.iter_mut().enumerate() {
            if let Err(error) = op(motor) {
                tracing::error!(index, %error, "motor write failed");
                result = result.and(Err(error));
            }
        }
        result
    }
}

/// The whole drive train: a left and a right side.
///
/// Dropping the group stops every motor.
pub struct DriveGroup<M: Wheel, const L: usize, const R: usize> {
    left: Side<M, L>,
    right: Side<M, R>,
}

impl<M: Wheel, const L: usize, const R: usize> DriveGroup<M, L, R> {
    pub fn new(
        left: Side<M, L>,
        right: Side<M, R>,
    ) -> Self {
        Self { left, right }
    }

    pub fn apply(
        &mut self,
        maneuver: Maneuver,
        speeds: &SpeedState,
    ) -> Result<(), MotorError> {
        tracing::debug!(?maneuver, "applying maneuver");
        match maneuver {
            Maneuver::Stop => self.stop(),
            _ => {
                let (left, right) = maneuver.side_speeds(speeds);
                self.set_sides(left, right)
            }
        }
    }

    pub fn forward(
        &mut self,
        speeds: &SpeedState,
    ) -> Result<(), MotorError> {
        self.apply(Maneuver::Forward, speeds)
    }

    pub fn back(
        &mut self,
        speeds: &SpeedState,
    ) -> Result<(), MotorError> {
        self.apply(Maneuver::Back, speeds)
    }

    pub fn left(
        &mut self,
        speeds: &SpeedState,
    ) -> Result<(), MotorError> {
        self.apply(Maneuver::Left, speeds)
    }

    pub fn right(
        &mut self,
        speeds: &SpeedState,
    ) -> Result<(), MotorError> {
        self.apply(Maneuver::Right, speeds)
    }

    /// Stop every motor on both sides, whatever they were doing.
    pub fn stop(&mut self) -> Result<(), MotorError> {
        let left = self.left.stop();
        let right = self.right.stop();
        left.and(right)
    }

    fn set_sides(
        &mut self,
        left: i32,
        right: i32,
    ) -> Result<(), MotorError> {
        let left = self.left.drive(left);
        let right = self.right.drive(right);
        left.and(right)
    }
}

impl<M: Wheel, const L: usize, const R: usize> Drop for DriveGroup<M, L, R> {
    fn drop(&mut self) {
        if let Err(error) = self.stop() {
            tracing::error!(%error, "failed to stop motors on shutdown");
        }
    }
}
