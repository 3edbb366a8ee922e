use crate::interface::fix::FixInfo;
use crate::prelude::DeviceError;
use crate::processing::payload::Payload;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Notifications delivered asynchronously by the radio/positioning subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioEvent {
    FixTimeout,
    Idle,
    WindowApproaching,
    SendingStarted,
    FixLost,
    FixAcquired,
    InternalFault,
}

impl fmt::Display for RadioEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RadioEvent::FixTimeout => "fix timeout",
            RadioEvent::Idle => "idle",
            RadioEvent::WindowApproaching => "window approaching",
            RadioEvent::SendingStarted => "sending started",
            RadioEvent::FixLost => "fix lost",
            RadioEvent::FixAcquired => "fix acquired",
            RadioEvent::InternalFault => "internal fault",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadioMode {
    #[default]
    Normal,
    Test,
}

/// Callback sink registered with the radio. Invoked outside the main cycle,
/// one call at a time; implementations must return quickly.
pub trait RadioListener: Send + Sync {
    fn on_event(&self, event: RadioEvent);
    fn on_fix(&self, fix: FixInfo);
}

/// Transmission side of the radio/positioning subsystem.
pub trait RadioLink: Send {
    fn begin(&mut self, mode: RadioMode, listener: Arc<dyn RadioListener>)
        -> Result<(), DeviceError>;
    /// Seconds on the radio's GNSS-derived clock.
    fn clock_seconds(&self) -> Result<u64, DeviceError>;
    /// Payload sent during the next transmission window.
    fn set_next_payload(&mut self, payload: &Payload);
}
