use crate::interface::camera::{CaptureConfig, CaptureDevice, CropRect, PixelFormat, RawFrame};
use crate::math::stats::StatsHelper;
use crate::prelude::{ControllerConfig, ControllerError, ControllerResult};
use crate::processing::tensor::TensorBuffer;
use crate::telemetry::log::StatusLog;

/// Centered crop of `input × resize_ratio` pixels per axis.
pub fn crop_rect(
    capture: &CaptureConfig,
    input_width: u32,
    input_height: u32,
    resize_ratio: u32,
) -> ControllerResult<CropRect> {
    if !resize_ratio.is_power_of_two() {
        return Err(ControllerError::InvalidConfig(format!(
            "resize ratio {} is not a power of two",
            resize_ratio
        )));
    }
    if input_width == 0 || input_height == 0 {
        return Err(ControllerError::InvalidConfig(
            "model input size must be non-zero".into(),
        ));
    }

    let crop_width = input_width.checked_mul(resize_ratio);
    let crop_height = input_height.checked_mul(resize_ratio);
    let (crop_width, crop_height) = match (crop_width, crop_height) {
        (Some(w), Some(h)) if w <= capture.width && h <= capture.height => (w, h),
        _ => {
            return Err(ControllerError::InvalidConfig(format!(
                "crop {}x{} (x{}) exceeds capture {}x{}",
                input_width, input_height, resize_ratio, capture.width, capture.height
            )))
        }
    };

    let left = (capture.width - crop_width) / 2;
    let top = (capture.height - crop_height) / 2;
    Ok(CropRect {
        left,
        top,
        right: left + crop_width - 1,
        bottom: top + crop_height - 1,
    })
}

/// Turns a captured frame into the normalized model-input tensor.
pub struct FramePreprocessor {
    rect: CropRect,
    tensor: TensorBuffer,
    logger: StatusLog,
}

impl FramePreprocessor {
    pub fn new(config: &ControllerConfig) -> ControllerResult<Self> {
        let rect = crop_rect(
            &config.capture,
            config.input_width,
            config.input_height,
            config.resize_ratio,
        )?;
        Ok(Self {
            rect,
            tensor: TensorBuffer::new(config.input_width, config.input_height),
            logger: StatusLog::new(),
        })
    }

    pub fn execute(
        &mut self,
        camera: &mut dyn CaptureDevice,
        frame: &RawFrame,
    ) -> ControllerResult<&TensorBuffer> {
        let width = self.tensor.width() as u32;
        let height = self.tensor.height() as u32;

        let scaled = camera
            .crop_resize(frame, self.rect, width, height)
            .map_err(ControllerError::CropResize)?;
        let gray = camera
            .to_grayscale(&scaled)
            .map_err(ControllerError::ColorConversion)?;

        if gray.format != PixelFormat::Gray8 || gray.width != width || gray.height != height {
            return Err(ControllerError::InvalidFrame(format!(
                "converted frame is {:?} {}x{}, expected Gray8 {}x{}",
                gray.format, gray.width, gray.height, width, height
            )));
        }

        self.tensor.load_gray(&gray.data)?;
        self.logger.debug(&format!(
            "tensor mean {:.4}",
            StatsHelper::mean(self.tensor.as_slice())
        ));
        Ok(&self.tensor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeCamera;

    fn small_config() -> ControllerConfig {
        ControllerConfig {
            capture: CaptureConfig {
                width: 16,
                height: 12,
                format: PixelFormat::Yuv422,
            },
            input_width: 4,
            input_height: 4,
            resize_ratio: 2,
            ..Default::default()
        }
    }

    #[test]
    fn default_crop_is_centered_and_in_bounds() {
        let config = ControllerConfig::default();
        let rect = crop_rect(&config.capture, 28, 28, 16).unwrap();
        assert_eq!(rect.left, (1280 - 448) / 2);
        assert_eq!(rect.top, (960 - 448) / 2);
        assert_eq!(rect.width(), 448);
        assert_eq!(rect.height(), 448);
        assert!(rect.right < config.capture.width);
        assert!(rect.bottom < config.capture.height);
    }

    #[test]
    fn crop_rejects_non_power_of_two_ratio() {
        let config = ControllerConfig::default();
        assert!(matches!(
            crop_rect(&config.capture, 28, 28, 12),
            Err(ControllerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn crop_rejects_oversized_rect() {
        let config = ControllerConfig::default();
        assert!(crop_rect(&config.capture, 28, 28, 64).is_err());
    }

    #[test]
    fn execute_produces_normalized_tensor() {
        let config = small_config();
        let mut camera = FakeCamera::with_luma(16, 12, |x, _| if x < 8 { 0 } else { 255 });
        let mut stage = FramePreprocessor::new(&config).unwrap();
        let frame = camera.take_picture().unwrap();

        let tensor = stage.execute(&mut camera, &frame).unwrap();
        assert_eq!(tensor.len(), 16);
        assert!(tensor.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
        // crop starts at x=4 with stride 2: columns 4,6 are dark, 8,10 bright
        assert_eq!(&tensor.as_slice()[..4], &[0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn conversion_failure_abandons_frame() {
        let config = small_config();
        let mut camera = FakeCamera::with_luma(16, 12, |_, _| 128);
        camera.fail_grayscale = true;
        let mut stage = FramePreprocessor::new(&config).unwrap();
        let frame = camera.take_picture().unwrap();

        assert!(matches!(
            stage.execute(&mut camera, &frame),
            Err(ControllerError::ColorConversion(_))
        ));
    }
}
