//! osdlink Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the OSD command
//! console needs from a board. Board firmware implements them on top of its
//! chip HAL; host tests implement them with in-memory fakes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  osdlink-core (console + dispatcher)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  osdlink-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │   osdlink-    │       │  host test    │
//! │   firmware    │       │    fakes      │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Host serial link
//! - [`clock::Clock`] - Monotonic uptime
//!
//! The OSD chip itself is reached through `embedded_hal::spi::SpiDevice`;
//! [`spi::SpiConfig`] only describes how a board must configure that bus.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod spi;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use spi::SpiConfig;
pub use uart::{UartRx, UartTx};
