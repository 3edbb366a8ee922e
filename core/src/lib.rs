//! Coordination core for a periodic vision-detection telemetry controller.
//!
//! A synchronous main cycle captures a frame, reduces it to a normalized
//! tensor and runs one forward pass; an asynchronous radio callback feeds
//! transmission-window and positioning events into shared flags that the
//! next cycle consumes when it packs a 16-byte payload.

pub mod control;
pub mod interface;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

#[cfg(test)]
mod testing;

pub use control::{Controller, Devices, TickOutcome};
pub use prelude::{ControllerConfig, ControllerError, ControllerResult, DeviceError};
