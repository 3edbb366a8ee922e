pub mod controller;
pub mod events;
pub mod flags;
pub mod indicators;
pub mod pacing;
pub mod shared;
pub mod state;

pub use controller::{Controller, Devices, TickOutcome};
pub use events::RadioEventHandler;
pub use flags::CoordinationFlags;
pub use indicators::{Indicator, IndicatorBank, IndicatorSnapshot};
pub use pacing::{run_paced, wait_ready};
pub use shared::SharedState;
pub use state::{OperatingState, StateController};
