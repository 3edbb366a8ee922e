use crate::control::events::RadioEventHandler;
use crate::control::indicators::IndicatorSnapshot;
use crate::control::shared::SharedState;
use crate::control::state::{OperatingState, StateController};
use crate::interface::camera::CaptureDevice;
use crate::interface::inference::InferenceRuntime;
use crate::interface::radio::RadioLink;
use crate::interface::storage::ModelStore;
use crate::prelude::{ControllerConfig, ControllerError, ControllerResult};
use crate::processing::inference::{Detection, InferenceAdapter};
use crate::processing::payload::{encode, Payload};
use crate::processing::preprocess::FramePreprocessor;
use crate::telemetry::log::StatusLog;
use crate::telemetry::metrics::{CycleMetrics, MetricsSnapshot};
use std::sync::Arc;
use std::time::Duration;

/// External collaborators handed to the controller at start-up.
pub struct Devices {
    pub camera: Box<dyn CaptureDevice>,
    pub runtime: Box<dyn InferenceRuntime>,
    pub radio: Box<dyn RadioLink>,
    pub store: Box<dyn ModelStore>,
}

/// What one main-cycle iteration did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Nothing to run: start-up never brought the vision pipeline up.
    Idle,
    /// Capture or preprocessing failed; the tick was abandoned.
    Skipped(ControllerError),
    Processed(Detection),
    PayloadSent {
        detection: Detection,
        payload: Payload,
    },
}

/// Capture, preprocess and infer, in that order.
struct VisionPipeline {
    camera: Box<dyn CaptureDevice>,
    preprocessor: FramePreprocessor,
    inference: InferenceAdapter,
}

impl VisionPipeline {
    fn process(&mut self) -> ControllerResult<Detection> {
        let frame = self
            .camera
            .take_picture()
            .ok_or(ControllerError::CaptureUnavailable)?;
        let tensor = self.preprocessor.execute(self.camera.as_mut(), &frame)?;
        Ok(self.inference.infer(tensor))
    }
}

/// Main cycle orchestrator. Owns every device; shares only `SharedState`
/// with the radio callback.
pub struct Controller {
    config: ControllerConfig,
    shared: Arc<SharedState>,
    state: StateController,
    radio: Box<dyn RadioLink>,
    pipeline: Option<VisionPipeline>,
    startup_error: Option<ControllerError>,
    metrics: CycleMetrics,
    logger: StatusLog,
}

impl Controller {
    /// Runs every start-up step. Never fails: a failed step leaves the
    /// controller in `Stopped` with the cause in `startup_error`.
    pub fn start(config: ControllerConfig, devices: Devices) -> Self {
        let shared = Arc::new(SharedState::new());
        let mut state = StateController::new(shared.indicators.clone(), config.blink_interval());
        let logger = StatusLog::new();

        let Devices {
            camera,
            runtime,
            mut radio,
            store,
        } = devices;
        let handler = Arc::new(RadioEventHandler::new(shared.clone()));

        let (pipeline, startup_error) =
            match Self::bring_up(&config, camera, runtime, radio.as_mut(), store.as_ref(), handler)
            {
                Ok(pipeline) => {
                    state.enter_running();
                    logger.record("start-up complete");
                    (Some(pipeline), None)
                }
                Err(err) => {
                    logger.error(&format!("start-up failed: {}", err));
                    state.enter_stopped(&err.to_string());
                    (None, Some(err))
                }
            };

        Self {
            config,
            shared,
            state,
            radio,
            pipeline,
            startup_error,
            metrics: CycleMetrics::new(),
            logger,
        }
    }

    fn bring_up(
        config: &ControllerConfig,
        mut camera: Box<dyn CaptureDevice>,
        runtime: Box<dyn InferenceRuntime>,
        radio: &mut dyn RadioLink,
        store: &dyn ModelStore,
        handler: Arc<RadioEventHandler>,
    ) -> ControllerResult<VisionPipeline> {
        let logger = StatusLog::new();
        config.validate()?;
        let preprocessor = FramePreprocessor::new(config)?;

        radio
            .begin(config.radio_mode, handler)
            .map_err(ControllerError::RadioStartup)?;
        logger.record("radio started");

        let model = store
            .read(&config.model_name)
            .map_err(|source| ControllerError::ModelMissing {
                name: config.model_name.clone(),
                source,
            })?;
        let inference = InferenceAdapter::start(runtime, &model, config.detection)?;
        logger.record("inference runtime started");

        camera.begin().map_err(ControllerError::CaptureStartup)?;
        camera
            .configure_still(&config.capture)
            .map_err(ControllerError::CaptureFormat)?;
        logger.record("camera started");

        Ok(VisionPipeline {
            camera,
            preprocessor,
            inference,
        })
    }

    /// One main-cycle iteration. `now` is the time since the cycle started.
    pub fn tick(&mut self, now: Duration) -> TickOutcome {
        self.metrics.record_tick();

        let pipeline = match self.pipeline.as_mut() {
            Some(pipeline) => pipeline,
            None => return TickOutcome::Idle,
        };
        let detection = match pipeline.process() {
            Ok(detection) => detection,
            Err(err) => {
                self.logger.warn(&format!("tick abandoned: {}", err));
                self.metrics.record_skipped();
                return TickOutcome::Skipped(err);
            }
        };

        self.logger.recognition(detection.score);
        if detection.detected {
            self.metrics.record_detection();
        }

        if !self.state.is_running() {
            return TickOutcome::Processed(detection);
        }

        self.state
            .update_error_indicator(self.shared.flags.gnss_timeout(), now);

        if !self.shared.flags.take_window_approaching() {
            return TickOutcome::Processed(detection);
        }

        let payload = self.build_payload(&detection);
        self.radio.set_next_payload(&payload);
        self.metrics.record_payload();
        self.logger
            .record(&format!("[payload] next payload {}", payload.hex()));
        TickOutcome::PayloadSent { detection, payload }
    }

    fn build_payload(&self, detection: &Detection) -> Payload {
        let clock = self.radio.clock_seconds().unwrap_or_else(|err| {
            self.logger
                .warn(&format!("radio clock unavailable, encoding zero time: {}", err));
            0
        });
        encode(detection.flag(), &self.shared.last_fix(), clock)
    }

    /// Operator shutdown. Stops periodic effects for good without flagging
    /// an error. Later ticks still capture and infer but set no indicator
    /// and hand off no payload.
    pub fn halt(&mut self, reason: &str) {
        self.state.shut_down(reason);
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> OperatingState {
        self.state.state()
    }

    pub fn startup_error(&self) -> Option<&ControllerError> {
        self.startup_error.as_ref()
    }

    pub fn shared(&self) -> Arc<SharedState> {
        self.shared.clone()
    }

    pub fn indicators(&self) -> IndicatorSnapshot {
        self.shared.indicators.snapshot()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
