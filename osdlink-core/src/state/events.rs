//! Events that trigger device state transitions

/// Lifecycle events raised by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceEvent {
    /// Software reset bit written to VM0
    ResetIssued,
    /// Reset did not complete: bus error, poll timeout or failed
    /// initialization
    ResetFailed,
    /// Default register set written
    Initialized,
}
