//! Device state machine definition

use super::events::DeviceEvent;

/// OSD chip lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceState {
    /// Power-on, nothing written yet
    #[default]
    Uninitialized,
    /// Software reset in progress
    Resetting,
    /// Registers configured
    Ready,
}

impl DeviceState {
    /// Process an event and return the next state
    pub fn transition(self, event: DeviceEvent) -> Self {
        use DeviceEvent::*;
        use DeviceState::*;

        match (self, event) {
            (Uninitialized, ResetIssued) | (Ready, ResetIssued) => Resetting,
            (Resetting, ResetFailed) => Uninitialized,

            // Initialization is idempotent and allowed from anywhere
            (_, Initialized) => Ready,

            // Default: stay in current state
            _ => self,
        }
    }
}
