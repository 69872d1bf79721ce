//! Board-agnostic core logic for the OSD firmware
//!
//! This crate contains everything that does not depend on a specific chip
//! or board:
//!
//! - Character grid and cursor model
//! - Character attribute model
//! - The [`traits::OsdDisplay`] interface a driver implements
//! - Device lifecycle state machine
//! - Configuration type definitions
//! - Command dispatcher and serial console loop

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod osd;
pub mod state;
pub mod traits;
