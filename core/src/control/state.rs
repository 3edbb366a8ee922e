use crate::control::indicators::{Indicator, IndicatorBank};
use crate::telemetry::log::StatusLog;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingState {
    Init,
    Running,
    Stopped,
}

impl fmt::Display for OperatingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OperatingState::Init => "init",
            OperatingState::Running => "running",
            OperatingState::Stopped => "stopped",
        };
        f.write_str(label)
    }
}

/// Operating-state machine plus the indicators it owns (running, error).
///
/// `Init` leaves exactly once. `Stopped` is terminal: once there, nothing in
/// this controller writes an indicator again.
pub struct StateController {
    state: OperatingState,
    indicators: Arc<IndicatorBank>,
    blink_interval: Duration,
    last_toggle: Duration,
    logger: StatusLog,
}

impl StateController {
    pub fn new(indicators: Arc<IndicatorBank>, blink_interval: Duration) -> Self {
        Self {
            state: OperatingState::Init,
            indicators,
            blink_interval,
            last_toggle: Duration::ZERO,
            logger: StatusLog::new(),
        }
    }

    pub fn state(&self) -> OperatingState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == OperatingState::Running
    }

    /// `Init -> Running`. Returns false if the transition is not allowed.
    pub fn enter_running(&mut self) -> bool {
        if self.state != OperatingState::Init {
            return false;
        }
        self.state = OperatingState::Running;
        self.indicators.set(Indicator::Running, true);
        self.indicators.set(Indicator::Error, false);
        self.logger.record("state: init -> running");
        true
    }

    /// Moves to the terminal state on a fault and latches the error indicator on.
    pub fn enter_stopped(&mut self, reason: &str) {
        if self.state == OperatingState::Stopped {
            return;
        }
        self.logger
            .error(&format!("state: {} -> stopped ({})", self.state, reason));
        self.state = OperatingState::Stopped;
        self.indicators.set(Indicator::Running, false);
        self.indicators.set(Indicator::Error, true);
    }

    /// Moves to the terminal state on request. The error indicator keeps
    /// whatever level it had.
    pub fn shut_down(&mut self, reason: &str) {
        if self.state == OperatingState::Stopped {
            return;
        }
        self.logger
            .record(&format!("state: {} -> stopped ({})", self.state, reason));
        self.state = OperatingState::Stopped;
        self.indicators.set(Indicator::Running, false);
    }

    /// Blinks the error indicator while the GNSS timeout holds, else keeps it off.
    ///
    /// Resolution is bounded by how often this is called, not by a timer.
    pub fn update_error_indicator(&mut self, gnss_timeout: bool, now: Duration) {
        if !self.is_running() {
            return;
        }
        if gnss_timeout {
            if now.saturating_sub(self.last_toggle) >= self.blink_interval {
                self.indicators.toggle(Indicator::Error);
                self.last_toggle = now;
            }
        } else if self.indicators.get(Indicator::Error) {
            self.indicators.set(Indicator::Error, false);
        }
    }
}
