use crate::generator::scene::{FrameGenerator, SceneConfig};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sightcore::interface::camera::{CaptureConfig, CaptureDevice, CropRect, PixelFormat, RawFrame};
use sightcore::DeviceError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CameraConfig {
    pub scene: SceneConfig,
    /// Probability that `take_picture` returns nothing.
    pub capture_failure_rate: f64,
}

/// Software camera: synthetic frames, nearest-neighbour scaling, luma extraction.
pub struct SimCamera {
    config: CameraConfig,
    generator: Option<FrameGenerator>,
    faults: StdRng,
    started: bool,
}

impl SimCamera {
    pub fn new(config: CameraConfig) -> Self {
        let faults = StdRng::seed_from_u64(config.scene.seed.wrapping_add(1));
        Self {
            config,
            generator: None,
            faults,
            started: false,
        }
    }
}

impl CaptureDevice for SimCamera {
    fn begin(&mut self) -> Result<(), DeviceError> {
        self.started = true;
        Ok(())
    }

    fn configure_still(&mut self, capture: &CaptureConfig) -> Result<(), DeviceError> {
        if !self.started {
            return Err(DeviceError::Unavailable("camera not started".into()));
        }
        if capture.format != PixelFormat::Yuv422 {
            return Err(DeviceError::Failed(format!(
                "still format {:?} unsupported",
                capture.format
            )));
        }
        self.generator = Some(FrameGenerator::new(
            self.config.scene.clone(),
            capture.width,
            capture.height,
        ));
        Ok(())
    }

    fn take_picture(&mut self) -> Option<RawFrame> {
        let rate = self.config.capture_failure_rate.clamp(0.0, 1.0);
        if self.faults.gen_bool(rate) {
            return None;
        }
        let (frame, has_target) = self.generator.as_mut()?.next_frame();
        log::debug!("captured frame (target present: {})", has_target);
        Some(frame)
    }

    fn crop_resize(
        &mut self,
        frame: &RawFrame,
        rect: CropRect,
        width: u32,
        height: u32,
    ) -> Result<RawFrame, DeviceError> {
        if rect.right >= frame.width || rect.bottom >= frame.height || width == 0 || height == 0 {
            return Err(DeviceError::Failed(format!(
                "crop {:?} to {}x{} outside {}x{} frame",
                rect, width, height, frame.width, frame.height
            )));
        }
        let bpp = frame.format.bytes_per_pixel();
        let mut data = Vec::with_capacity(width as usize * height as usize * bpp);
        for y in 0..height {
            let src_y = (rect.top + y * rect.height() / height) as usize;
            for x in 0..width {
                let src_x = (rect.left + x * rect.width() / width) as usize;
                let offset = (src_y * frame.width as usize + src_x) * bpp;
                data.extend_from_slice(&frame.data[offset..offset + bpp]);
            }
        }
        Ok(RawFrame::new(width, height, frame.format, data))
    }

    fn to_grayscale(&mut self, frame: &RawFrame) -> Result<RawFrame, DeviceError> {
        let data = match frame.format {
            PixelFormat::Gray8 => frame.data.clone(),
            PixelFormat::Yuv422 => frame.data.chunks_exact(2).map(|px| px[1]).collect(),
        };
        Ok(RawFrame::new(frame.width, frame.height, PixelFormat::Gray8, data))
    }
}
