//! Monotonic time source

/// Millisecond uptime counter
///
/// Backs the `m` console command. Wraps after ~49 days like any 32-bit
/// millisecond counter; the console reports the raw value.
pub trait Clock {
    /// Milliseconds since boot
    fn millis(&self) -> u32;
}
