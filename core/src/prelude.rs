use crate::interface::camera::{CaptureConfig, PixelFormat};
use crate::interface::radio::RadioMode;
use crate::processing::inference::DetectionPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Shared configuration for the controller and every stage it drives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub capture: CaptureConfig,
    pub input_width: u32,
    pub input_height: u32,
    /// Crop side divided by model input side. The downscaler only accepts powers of two.
    pub resize_ratio: u32,
    pub period_ms: u64,
    pub blink_interval_ms: u64,
    pub model_name: String,
    pub radio_mode: RadioMode,
    pub detection: DetectionPolicy,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            capture: CaptureConfig {
                width: 1280,
                height: 960,
                format: PixelFormat::Yuv422,
            },
            input_width: 28,
            input_height: 28,
            resize_ratio: 16,
            period_ms: 1000,
            blink_interval_ms: 1000,
            model_name: "model.nnb".to_string(),
            radio_mode: RadioMode::Normal,
            detection: DetectionPolicy::NonZero,
        }
    }
}

impl ControllerConfig {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms)
    }

    /// Checks the settings no device can reject for us.
    pub fn validate(&self) -> ControllerResult<()> {
        if self.period_ms == 0 {
            return Err(ControllerError::InvalidConfig(
                "main cycle period must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Failure reported by an external collaborator (camera, runtime, storage, radio).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    #[error("device unavailable: {0}")]
    Unavailable(String),
    #[error("operation failed: {0}")]
    Failed(String),
    #[error("not found: {0}")]
    NotFound(String),
}

/// Common error type for start-up and per-tick work.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ControllerError {
    #[error("radio start-up failed: {0}")]
    RadioStartup(DeviceError),
    #[error("model file {name} unavailable: {source}")]
    ModelMissing { name: String, source: DeviceError },
    #[error("inference runtime start-up failed: {0}")]
    RuntimeStartup(DeviceError),
    #[error("capture device start-up failed: {0}")]
    CaptureStartup(DeviceError),
    #[error("capture format configuration failed: {0}")]
    CaptureFormat(DeviceError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("no frame available from capture device")]
    CaptureUnavailable,
    #[error("crop/resize failed: {0}")]
    CropResize(DeviceError),
    #[error("grayscale conversion failed: {0}")]
    ColorConversion(DeviceError),
    #[error("unexpected frame: {0}")]
    InvalidFrame(String),
}

pub type ControllerResult<T> = Result<T, ControllerError>;
