use crate::prelude::DeviceError;

/// Neural-network runtime holding one loaded model.
pub trait InferenceRuntime: Send {
    fn load(&mut self, model: &[u8]) -> Result<(), DeviceError>;
    fn bind_input(&mut self, slot: usize, tensor: &[f32]);
    fn forward(&mut self);
    fn read_output(&self, slot: usize) -> &[f32];
}
