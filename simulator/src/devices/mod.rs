pub mod camera;
pub mod radio;
pub mod runtime;

pub use camera::{CameraConfig, SimCamera};
pub use radio::{RadioSchedule, SimRadio};
pub use runtime::SimRuntime;
