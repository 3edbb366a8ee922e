use crate::devices::{CameraConfig, RadioSchedule};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use sightcore::ControllerConfig;
use std::fs;
use std::path::Path;

/// Simulated device behaviour.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub camera: CameraConfig,
    pub radio: RadioSchedule,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub controller: ControllerConfig,
    pub scenario: ScenarioConfig,
}

impl SimConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading simulator config {}", path_ref.display()))?;
        let config: SimConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing simulator config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(period_ms: u64, seed: u64) -> Self {
        let mut config = Self::default();
        config.controller.period_ms = period_ms;
        config.scenario.camera.scene.seed = seed;
        config
    }
}
