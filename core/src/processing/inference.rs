use crate::interface::inference::InferenceRuntime;
use crate::prelude::{ControllerError, ControllerResult};
use crate::processing::tensor::TensorBuffer;
use serde::{Deserialize, Serialize};

pub type DetectionScore = f32;

const INPUT_SLOT: usize = 0;
const OUTPUT_SLOT: usize = 0;

/// How a raw score becomes a detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DetectionPolicy {
    /// Any nonzero score counts as a detection.
    #[default]
    NonZero,
    /// Score at or above the threshold counts as a detection.
    Threshold { min_score: f32 },
}

impl DetectionPolicy {
    pub fn is_detected(&self, score: DetectionScore) -> bool {
        match *self {
            DetectionPolicy::NonZero => score != 0.0,
            DetectionPolicy::Threshold { min_score } => score >= min_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub score: DetectionScore,
    pub detected: bool,
}

impl Detection {
    /// Flag value carried in the payload.
    pub fn flag(&self) -> i16 {
        i16::from(self.detected)
    }
}

/// Drives one forward pass per tensor. Owned by the main cycle only.
pub struct InferenceAdapter {
    runtime: Box<dyn InferenceRuntime>,
    policy: DetectionPolicy,
}

impl InferenceAdapter {
    pub fn start(
        mut runtime: Box<dyn InferenceRuntime>,
        model: &[u8],
        policy: DetectionPolicy,
    ) -> ControllerResult<Self> {
        runtime
            .load(model)
            .map_err(ControllerError::RuntimeStartup)?;
        Ok(Self { runtime, policy })
    }

    pub fn infer(&mut self, tensor: &TensorBuffer) -> Detection {
        self.runtime.bind_input(INPUT_SLOT, tensor.as_slice());
        self.runtime.forward();
        let score = self
            .runtime
            .read_output(OUTPUT_SLOT)
            .first()
            .copied()
            .unwrap_or(0.0);
        Detection {
            score,
            detected: self.policy.is_detected(score),
        }
    }
}
