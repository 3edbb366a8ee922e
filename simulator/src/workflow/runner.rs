use crate::devices::{SimCamera, SimRadio, SimRuntime};
use crate::workflow::config::SimConfig;
use anyhow::bail;
use sightcore::control::{run_paced, wait_ready, OperatingState};
use sightcore::interface::storage::FsModelStore;
use sightcore::processing::Payload;
use sightcore::telemetry::MetricsSnapshot;
use sightcore::{Controller, ControllerError, Devices};
use std::path::PathBuf;
use tokio::sync::{oneshot, watch};

pub struct RunSummary {
    pub metrics: MetricsSnapshot,
    pub state: OperatingState,
    pub startup_error: Option<ControllerError>,
    /// Payloads handed to the radio, in order.
    pub handed_off: usize,
    /// Payloads the simulated radio actually put on the air.
    pub transmitted: Vec<Payload>,
}

#[derive(Clone)]
pub struct Runner {
    config: SimConfig,
    model_dir: PathBuf,
}

impl Runner {
    pub fn new(config: SimConfig, model_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            model_dir: model_dir.into(),
        }
    }

    pub async fn execute(
        &self,
        ready: oneshot::Receiver<()>,
        shutdown: watch::Receiver<bool>,
        max_ticks: Option<usize>,
    ) -> anyhow::Result<RunSummary> {
        if !wait_ready(ready).await {
            bail!("operator side closed before signalling ready");
        }

        let radio = SimRadio::new(self.config.scenario.radio.clone());
        let transmissions = radio.transmissions();
        let devices = Devices {
            camera: Box::new(SimCamera::new(self.config.scenario.camera.clone())),
            runtime: Box::new(SimRuntime::default()),
            radio: Box::new(radio),
            store: Box::new(FsModelStore::new(&self.model_dir)),
        };

        let mut controller = Controller::start(self.config.controller.clone(), devices);
        let metrics = run_paced(&mut controller, shutdown, max_ticks).await;
        let state = controller.state();
        let startup_error = controller.startup_error().cloned();
        controller.halt("simulation finished");

        Ok(RunSummary {
            metrics,
            state,
            startup_error,
            handed_off: metrics.payloads,
            transmitted: transmissions.snapshot(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightcore::interface::camera::{CaptureConfig, PixelFormat};
    use std::fs;

    fn small_config() -> SimConfig {
        let mut config = SimConfig::default();
        config.controller.capture = CaptureConfig {
            width: 320,
            height: 240,
            format: PixelFormat::Yuv422,
        };
        config.controller.resize_ratio = 8;
        config.scenario.radio.window_period_secs = 5;
        config.scenario.camera.scene.target_probability = 1.0;
        config
    }

    fn model_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("model.nnb"),
            br#"{"threshold": 0.6, "min_fraction": 0.01}"#,
        )
        .unwrap();
        dir
    }

    #[tokio::test(start_paused = true)]
    async fn runner_hands_off_payloads_on_window_notices() {
        let dir = model_dir();
        let runner = Runner::new(small_config(), dir.path());
        let (ready_tx, ready_rx) = oneshot::channel();
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        ready_tx.send(()).unwrap();

        let summary = runner
            .execute(ready_rx, shutdown_rx, Some(12))
            .await
            .unwrap();
        assert!(summary.startup_error.is_none());
        assert_eq!(summary.state, OperatingState::Running);
        assert_eq!(summary.metrics.ticks, 12);
        assert!((1..=2).contains(&summary.handed_off));
        assert!(summary.metrics.detections > 0);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_model_leaves_controller_stopped() {
        let dir = tempfile::tempdir().unwrap();
        let runner = Runner::new(small_config(), dir.path());
        let (ready_tx, ready_rx) = oneshot::channel();
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        ready_tx.send(()).unwrap();

        let summary = runner
            .execute(ready_rx, shutdown_rx, Some(3))
            .await
            .unwrap();
        assert_eq!(summary.state, OperatingState::Stopped);
        assert!(matches!(
            summary.startup_error,
            Some(ControllerError::ModelMissing { .. })
        ));
        assert_eq!(summary.handed_off, 0);
        assert!(summary.transmitted.is_empty());
    }

    #[tokio::test]
    async fn runner_requires_ready_signal() {
        let runner = Runner::new(small_config(), "unused");
        let (ready_tx, ready_rx) = oneshot::channel::<()>();
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        drop(ready_tx);
        assert!(runner.execute(ready_rx, shutdown_rx, Some(1)).await.is_err());
    }
}
