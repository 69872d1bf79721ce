//! Configuration types
//!
//! Board-agnostic settings. Firmware builds them from `osd.toml` at compile
//! time; host tests use the defaults.

pub mod types;

pub use types::*;
