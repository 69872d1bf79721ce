//! Inter-task signals

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Raised by the console loop every time it finishes a poll
pub static CONSOLE_ALIVE: Signal<CriticalSectionRawMutex, ()> = Signal::new();
