use serde::{Deserialize, Serialize};
use sightcore::interface::inference::InferenceRuntime;
use sightcore::DeviceError;

/// Parameters of the brightness "model", stored as JSON in the model file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BrightnessModel {
    /// Normalized intensity a sample must reach to count as lit.
    pub threshold: f32,
    /// Fraction of lit samples below which the output is forced to zero.
    #[serde(default)]
    pub min_fraction: f32,
}

/// Stand-in runtime that scores a tensor by the fraction of bright samples.
#[derive(Default)]
pub struct SimRuntime {
    model: Option<BrightnessModel>,
    input: Vec<f32>,
    output: Vec<f32>,
}

impl InferenceRuntime for SimRuntime {
    fn load(&mut self, model: &[u8]) -> Result<(), DeviceError> {
        let parsed: BrightnessModel = serde_json::from_slice(model)
            .map_err(|err| DeviceError::Failed(format!("unreadable model: {}", err)))?;
        self.model = Some(parsed);
        self.output = vec![0.0];
        Ok(())
    }

    fn bind_input(&mut self, _slot: usize, tensor: &[f32]) {
        self.input.clear();
        self.input.extend_from_slice(tensor);
    }

    fn forward(&mut self) {
        let Some(model) = self.model else {
            return;
        };
        let lit = self.input.iter().filter(|&&v| v >= model.threshold).count();
        let fraction = if self.input.is_empty() {
            0.0
        } else {
            lit as f32 / self.input.len() as f32
        };
        self.output[0] = if fraction >= model.min_fraction && lit > 0 {
            fraction
        } else {
            0.0
        };
    }

    fn read_output(&self, _slot: usize) -> &[f32] {
        &self.output
    }
}
