//! OSD device lifecycle
//!
//! The driver tracks whether the chip has been brought up. The state is
//! informational: commands are not refused in any state.

pub mod events;
pub mod machine;

pub use events::DeviceEvent;
pub use machine::DeviceState;
