//! Hardware abstraction traits
//!
//! These traits define the interface between the command engine and the
//! chip-specific driver.

pub mod osd;

pub use osd::OsdDisplay;
