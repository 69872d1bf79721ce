//! Embassy async tasks
//!
//! The console owns the OSD chip and the host link; the watchdog only
//! listens for its heartbeat.

pub mod console;
pub mod watchdog;

pub use console::console_task;
pub use watchdog::watchdog_task;
