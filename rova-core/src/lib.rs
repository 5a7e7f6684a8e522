//! Core drivers and request handling for the Rova-4 four-motor platform on
//! no-std embedded targets.
//!
//! For a host-side run of the server loop, see the `mock-mcu` app.
#![cfg_attr(not(test), no_std)]

pub mod utils;
