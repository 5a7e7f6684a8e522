//! Utility re-exports and helper macros for the Rova-4 controller.
//!
//! - `config`: startup parameters (pin map, speed presets, server options)
//! - `connection`: HTTP request parsing, response framing and the accept loop
//! - `controllers`: motor drivers, drive grouping, speed presets and dispatch
//! - `frontend`: the remote-control page served to browsers
//!
//! The `mk_static!` macro simplifies static initialization in no-std contexts.

pub mod config;
pub mod connection;
pub mod controllers;
pub(crate) mod frontend;

pub use config::{BoardConfig, ServerConfig};
pub use connection::server::run as serve;
pub use controllers::Controller;
pub use embassy_time::*;
pub use static_cell::StaticCell;

#[macro_export]
/// Initialize a no-std static cell and write the given value into it.
///
/// This macro creates a `StaticCell` for type `$t` and initializes it with
/// `$val`, returning a mutable reference to the stored value.
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: $crate::utils::StaticCell<$t> = $crate::utils::StaticCell::new();
        STATIC_CELL.uninit().write($val)
    }};
}
