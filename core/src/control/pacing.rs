use crate::control::controller::{Controller, TickOutcome};
use crate::telemetry::log::StatusLog;
use crate::telemetry::metrics::MetricsSnapshot;
use tokio::sync::{oneshot, watch};
use tokio::time::{self, Instant, MissedTickBehavior};

/// Blocks until the operator side signals it is ready. Returns false if the
/// sender went away without signalling.
pub async fn wait_ready(ready: oneshot::Receiver<()>) -> bool {
    ready.await.is_ok()
}

/// Runs the main cycle once per configured period until `shutdown` flips to
/// true, its sender drops, or `max_ticks` iterations have run.
///
/// Ticks are spaced by at least the period; a slow tick delays the next one
/// instead of bursting to catch up.
pub async fn run_paced(
    controller: &mut Controller,
    mut shutdown: watch::Receiver<bool>,
    max_ticks: Option<usize>,
) -> MetricsSnapshot {
    let logger = StatusLog::new();
    let period = controller.config().period();
    if period.is_zero() {
        logger.error("main cycle period is zero, not starting the loop");
        return controller.metrics();
    }
    let start = Instant::now();
    let mut interval = time::interval_at(start + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ticks = 0usize;
    while !*shutdown.borrow() && max_ticks.map_or(true, |limit| ticks < limit) {
        tokio::select! {
            _ = interval.tick() => {
                if let TickOutcome::PayloadSent { detection, .. } = controller.tick(start.elapsed()) {
                    logger.debug(&format!("tick {} handed off payload (flag {})", ticks, detection.flag()));
                }
                ticks += 1;
            }
            changed = shutdown.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    logger.record(&format!("main cycle finished after {} ticks", ticks));
    controller.metrics()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::controller::Devices;
    use crate::interface::radio::RadioEvent;
    use crate::control::state::OperatingState;
    use crate::prelude::{ControllerConfig, ControllerError};
    use crate::testing::{FakeCamera, FakeRadio, FakeRuntime, FakeStore};
    use std::time::Duration;

    fn controller(radio: &FakeRadio) -> Controller {
        let config = ControllerConfig::default();
        let camera = FakeCamera::with_luma(config.capture.width, config.capture.height, |_, _| 40);
        Controller::start(
            config,
            Devices {
                camera: Box::new(camera),
                runtime: Box::new(FakeRuntime::returning(vec![1.0])),
                radio: Box::new(radio.clone()),
                store: Box::new(FakeStore {
                    model: Some(vec![0]),
                }),
            },
        )
    }

    #[tokio::test]
    async fn ready_signal_unblocks_wait() {
        let (tx, rx) = oneshot::channel();
        tx.send(()).unwrap();
        assert!(wait_ready(rx).await);

        let (tx, rx) = oneshot::channel::<()>();
        drop(tx);
        assert!(!wait_ready(rx).await);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_are_spaced_by_period() {
        let radio = FakeRadio::default();
        let mut controller = controller(&radio);
        let (_tx, rx) = watch::channel(false);

        let started = Instant::now();
        let metrics = run_paced(&mut controller, rx, Some(3)).await;
        assert_eq!(metrics.ticks, 3);
        assert!(started.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_period_stops_at_start_up_and_never_ticks() {
        let radio = FakeRadio::default();
        let config = ControllerConfig {
            period_ms: 0,
            ..Default::default()
        };
        let camera = FakeCamera::with_luma(config.capture.width, config.capture.height, |_, _| 40);
        let mut controller = Controller::start(
            config,
            Devices {
                camera: Box::new(camera),
                runtime: Box::new(FakeRuntime::returning(vec![1.0])),
                radio: Box::new(radio.clone()),
                store: Box::new(FakeStore {
                    model: Some(vec![0]),
                }),
            },
        );
        assert_eq!(controller.state(), OperatingState::Stopped);
        assert!(matches!(
            controller.startup_error(),
            Some(ControllerError::InvalidConfig(_))
        ));

        let (_tx, rx) = watch::channel(false);
        let metrics = run_paced(&mut controller, rx, Some(2)).await;
        assert_eq!(metrics.ticks, 0);
        assert!(radio.sent().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_the_loop() {
        let radio = FakeRadio::default();
        let mut controller = controller(&radio);
        let (tx, rx) = watch::channel(false);
        radio.fire(RadioEvent::WindowApproaching);

        let stopper = tokio::spawn(async move {
            time::sleep(Duration::from_millis(2500)).await;
            tx.send(true).unwrap();
        });
        let metrics = run_paced(&mut controller, rx, None).await;
        stopper.await.unwrap();

        assert_eq!(metrics.ticks, 2);
        assert_eq!(metrics.payloads, 1);
        assert_eq!(radio.sent().len(), 1);
    }
}
