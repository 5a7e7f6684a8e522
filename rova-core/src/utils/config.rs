//! Startup parameters for the controller.
//!
//! Pin numbers are only labels at this level: the board binary turns them into
//! HAL pins, and the host harness uses them to name its simulated outputs.

use embassy_time::Duration;
use serde::{Deserialize, Serialize};

use crate::utils::controllers::speed::SpeedState;

/// PWM frequency used for every H-bridge enable input unless overridden.
pub const DEFAULT_PWM_FREQ: u32 = 20_000;

/// Largest request snapshot the server reads from a connection.
pub const RECV_LIMIT: usize = 1024;

/// Wiring of a single H-bridge channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotorConfig {
    /// Direction input asserted for forward rotation.
    pub in1: u8,
    /// Direction input asserted for reverse rotation.
    pub in2: u8,
    /// PWM-capable enable input.
    pub ena: u8,
    #[serde(default = "default_pwm_freq")]
    pub pwm_freq: u32,
    /// Swap forward/reverse for motors mounted mirrored on the chassis.
    #[serde(default)]
    pub invert: bool,
}

fn default_pwm_freq() -> u32 {
    DEFAULT_PWM_FREQ
}

impl MotorConfig {
    pub const fn new(
        in1: u8,
        in2: u8,
        ena: u8,
    ) -> Self {
        Self {
            in1,
            in2,
            ena,
            pwm_freq: DEFAULT_PWM_FREQ,
            invert: false,
        }
    }

    pub const fn with_invert(
        mut self,
        invert: bool,
    ) -> Self {
        self.invert = invert;
        self
    }
}

/// Motor wiring grouped by chassis side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinMap {
    pub left: [MotorConfig; 2],
    pub right: [MotorConfig; 2],
}

impl Default for PinMap {
    /// Two L298N boards: channels A/B of board 1 are M1/M2, of board 2 M3/M4.
    /// M1 and M3 sit on the left, M2 and M4 on the right.
    fn default() -> Self {
        Self {
            left: [MotorConfig::new(19, 18, 16), MotorConfig::new(13, 12, 15)],
            right: [MotorConfig::new(20, 21, 17), MotorConfig::new(11, 10, 14)],
        }
    }
}

/// Everything a board needs to bring the drive up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub pins: PinMap,
    #[serde(default)]
    pub speeds: SpeedState,
}

/// Options for the HTTP accept loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Inactivity timeout for an accepted connection. `None` blocks forever
    /// on a silent client, which stalls every later request.
    pub read_timeout: Option<Duration>,
    /// Bytes taken from the single request read, capped at [`RECV_LIMIT`].
    pub recv_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 80,
            read_timeout: None,
            recv_limit: RECV_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Request buffer length actually used by the server.
    pub fn effective_recv_limit(&self) -> usize {
        self.recv_limit.clamp(1, RECV_LIMIT)
    }
}
