//! Module Exports
//!
//! This file exports the key modules used by the HTTP front of the
//! controller.
//!
//! # Modules
//! - `http`: request target extraction and response framing.
//! - `server`: the accept loop and per-connection handling.

pub mod http;
pub mod server;

pub use http::Response;
pub use server::{serve_connection, ServeError};
