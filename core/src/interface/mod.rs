//! Contracts for the external collaborators the controller drives.
//!
//! Camera, inference runtime, model storage and the radio/positioning
//! subsystem are opaque to the core; only their pass/fail behaviour matters.

pub mod camera;
pub mod fix;
pub mod inference;
pub mod radio;
pub mod storage;

pub use camera::{CaptureConfig, CaptureDevice, CropRect, PixelFormat, RawFrame};
pub use fix::{FixInfo, FixParseError, Hemisphere};
pub use inference::InferenceRuntime;
pub use radio::{RadioEvent, RadioLink, RadioListener, RadioMode};
pub use storage::{FsModelStore, ModelStore};
