use crate::prelude::DeviceError;
use serde::{Deserialize, Serialize};

/// Pixel layout of a frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// Packed UYVY, two bytes per pixel, luma in the odd bytes.
    Yuv422,
    Gray8,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Yuv422 => 2,
            PixelFormat::Gray8 => 1,
        }
    }
}

/// Still-picture format requested from the capture device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

/// Frame buffer produced by the capture device. Consumed within one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

impl RawFrame {
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            format,
            data,
        }
    }

    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_pixel()
    }

    pub fn is_consistent(&self) -> bool {
        self.data.len() == self.expected_len()
    }
}

/// Crop rectangle with inclusive corners, in capture-frame pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRect {
    pub fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }
}

/// Camera driver as seen by the controller.
pub trait CaptureDevice: Send {
    fn begin(&mut self) -> Result<(), DeviceError>;
    fn configure_still(&mut self, config: &CaptureConfig) -> Result<(), DeviceError>;
    fn take_picture(&mut self) -> Option<RawFrame>;
    /// Crops `rect` out of `frame` and scales it to `width`×`height` in one pass.
    fn crop_resize(
        &mut self,
        frame: &RawFrame,
        rect: CropRect,
        width: u32,
        height: u32,
    ) -> Result<RawFrame, DeviceError>;
    fn to_grayscale(&mut self, frame: &RawFrame) -> Result<RawFrame, DeviceError>;
}
