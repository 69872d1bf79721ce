//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined in
//! osdlink-core:
//!
//! - MAX7456 register map and register value types
//! - SPI register transport
//! - [`osd::Max7456`] driver implementing [`osdlink_core::traits::OsdDisplay`]

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod osd;
