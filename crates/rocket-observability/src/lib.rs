//! Observability for the RocketShoes cart.
//!
//! Library crates emit `tracing` events; binaries call [`init_logging`] once
//! at startup to install a subscriber that renders them.

mod logging;

pub use logging::*;
