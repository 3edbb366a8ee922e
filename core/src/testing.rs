//! In-memory stand-ins for the external collaborators, for unit tests.

use crate::interface::camera::{CaptureConfig, CaptureDevice, CropRect, PixelFormat, RawFrame};
use crate::interface::fix::FixInfo;
use crate::interface::inference::InferenceRuntime;
use crate::interface::radio::{RadioEvent, RadioLink, RadioListener, RadioMode};
use crate::interface::storage::ModelStore;
use crate::prelude::DeviceError;
use crate::processing::payload::Payload;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub struct FakeCamera {
    frame: RawFrame,
    pub begin_error: Option<DeviceError>,
    pub format_error: Option<DeviceError>,
    pub fail_capture: bool,
    pub fail_grayscale: bool,
    /// Calls to `configure_still`, readable after the camera is boxed.
    pub configured: Arc<AtomicUsize>,
}

impl FakeCamera {
    /// UYVY frame whose luma at `(x, y)` is `luma(x, y)`.
    pub fn with_luma(width: u32, height: u32, luma: impl Fn(u32, u32) -> u8) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 2);
        for y in 0..height {
            for x in 0..width {
                data.push(128);
                data.push(luma(x, y));
            }
        }
        Self {
            frame: RawFrame::new(width, height, PixelFormat::Yuv422, data),
            begin_error: None,
            format_error: None,
            fail_capture: false,
            fail_grayscale: false,
            configured: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl CaptureDevice for FakeCamera {
    fn begin(&mut self) -> Result<(), DeviceError> {
        self.begin_error.clone().map_or(Ok(()), Err)
    }

    fn configure_still(&mut self, _config: &CaptureConfig) -> Result<(), DeviceError> {
        self.configured.fetch_add(1, Ordering::SeqCst);
        self.format_error.clone().map_or(Ok(()), Err)
    }

    fn take_picture(&mut self) -> Option<RawFrame> {
        (!self.fail_capture).then(|| self.frame.clone())
    }

    fn crop_resize(
        &mut self,
        frame: &RawFrame,
        rect: CropRect,
        width: u32,
        height: u32,
    ) -> Result<RawFrame, DeviceError> {
        let step_x = rect.width() / width;
        let step_y = rect.height() / height;
        let mut data = Vec::with_capacity(width as usize * height as usize * 2);
        for y in 0..height {
            for x in 0..width {
                let src_x = (rect.left + x * step_x) as usize;
                let src_y = (rect.top + y * step_y) as usize;
                let offset = (src_y * frame.width as usize + src_x) * 2;
                data.extend_from_slice(&frame.data[offset..offset + 2]);
            }
        }
        Ok(RawFrame::new(width, height, PixelFormat::Yuv422, data))
    }

    fn to_grayscale(&mut self, frame: &RawFrame) -> Result<RawFrame, DeviceError> {
        if self.fail_grayscale {
            return Err(DeviceError::Failed("conversion unsupported".into()));
        }
        let data = frame.data.chunks_exact(2).map(|px| px[1]).collect();
        Ok(RawFrame::new(frame.width, frame.height, PixelFormat::Gray8, data))
    }
}

pub struct FakeRuntime {
    output: Vec<f32>,
    pub load_error: Option<DeviceError>,
    /// Forward passes run, readable after the runtime is boxed.
    pub forwards: Arc<AtomicUsize>,
}

impl FakeRuntime {
    pub fn returning(output: Vec<f32>) -> Self {
        Self {
            output,
            load_error: None,
            forwards: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl InferenceRuntime for FakeRuntime {
    fn load(&mut self, _model: &[u8]) -> Result<(), DeviceError> {
        self.load_error.clone().map_or(Ok(()), Err)
    }

    fn bind_input(&mut self, _slot: usize, _tensor: &[f32]) {}

    fn forward(&mut self) {
        self.forwards.fetch_add(1, Ordering::SeqCst);
    }

    fn read_output(&self, _slot: usize) -> &[f32] {
        &self.output
    }
}

/// Radio double that exposes the registered listener and every hand-off.
#[derive(Clone, Default)]
pub struct FakeRadio {
    pub listener: Arc<Mutex<Option<Arc<dyn RadioListener>>>>,
    pub payloads: Arc<Mutex<Vec<Payload>>>,
    pub begin_error: Option<DeviceError>,
    pub clock: u64,
}

impl FakeRadio {
    pub fn fire(&self, event: RadioEvent) {
        if let Some(listener) = self.listener.lock().unwrap().as_ref() {
            listener.on_event(event);
        }
    }

    pub fn deliver_fix(&self, fix: FixInfo) {
        if let Some(listener) = self.listener.lock().unwrap().as_ref() {
            listener.on_fix(fix);
        }
    }

    pub fn sent(&self) -> Vec<Payload> {
        self.payloads.lock().unwrap().clone()
    }
}

impl RadioLink for FakeRadio {
    fn begin(
        &mut self,
        _mode: RadioMode,
        listener: Arc<dyn RadioListener>,
    ) -> Result<(), DeviceError> {
        if let Some(err) = self.begin_error.clone() {
            return Err(err);
        }
        *self.listener.lock().unwrap() = Some(listener);
        Ok(())
    }

    fn clock_seconds(&self) -> Result<u64, DeviceError> {
        Ok(self.clock)
    }

    fn set_next_payload(&mut self, payload: &Payload) {
        self.payloads.lock().unwrap().push(*payload);
    }
}

pub struct FakeStore {
    pub model: Option<Vec<u8>>,
}

impl ModelStore for FakeStore {
    fn read(&self, name: &str) -> Result<Vec<u8>, DeviceError> {
        self.model
            .clone()
            .ok_or_else(|| DeviceError::NotFound(name.to_string()))
    }
}
