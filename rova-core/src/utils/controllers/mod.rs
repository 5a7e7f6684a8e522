//! Module Exports
//!
//! Hardware control and request dispatch for the Rova-4 platform.
//!
//! - `motor`: single H-bridge channel driver
//! - `drive`: left/right grouping and maneuvers
//! - `speed`: shared speed presets
//! - `command`: request target classification

pub mod command;
pub mod drive;
pub mod motor;
pub mod speed;

pub use command::{Command, SpeedParamError};
pub use drive::{DriveGroup, Maneuver, Side};
pub use motor::{Motor, MotorError, Wheel, MAX_DUTY};
pub use speed::{SpeedState, MIN_DUTY};

use crate::utils::connection::http::{self, Response};

/// Owns the drive train and the speed presets and applies one request at a
/// time.
///
/// The accept loop is the only caller, so a `/speed` update from one request
/// is visible to the next without any locking.
pub struct Controller<M: Wheel, const L: usize, const R: usize> {
    drive: DriveGroup<M, L, R>,
    speeds: SpeedState,
}

impl<M: Wheel, const L: usize, const R: usize> Controller<M, L, R> {
    pub fn new(
        drive: DriveGroup<M, L, R>,
        speeds: SpeedState,
    ) -> Self {
        Controller { drive, speeds }
    }

    pub fn speeds(&self) -> &SpeedState {
        &self.speeds
    }

    /// Stop every motor, independent of any request.
    pub fn all_stop(&mut self) -> Result<(), MotorError> {
        self.drive.stop()
    }

    /// Classify a raw request snapshot and apply it.
    pub fn handle(
        &mut self,
        request: &[u8],
    ) -> Response {
        let target = http::request_target(request);
        tracing::debug!(path = target, "request");
        self.execute(Command::parse(target))
    }

    /// Apply a parsed command and pick the response.
    ///
    /// A rejected `/speed` value is answered exactly like an accepted one so
    /// a slider never surfaces an error.
    pub fn execute(
        &mut self,
        command: Command,
    ) -> Response {
        match command {
            Command::SetSpeed(Ok(value)) => {
                let applied = self.speeds.set_speed(value);
                tracing::debug!(requested = value, applied, "speed updated");
                Response::Ok
            }
            Command::SetSpeed(Err(error)) => {
                tracing::warn!(%error, "ignoring speed update");
                Response::Ok
            }
            other => {
                if let Some(maneuver) = other.maneuver() {
                    if let Err(error) = self.drive.apply(maneuver, &self.speeds) {
                        tracing::error!(?maneuver, %error, "maneuver incomplete");
                    }
                }
                Response::Page {
                    speed: self.speeds.current(),
                }
            }
        }
    }
}
