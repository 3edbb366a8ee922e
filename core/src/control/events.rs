use crate::control::indicators::Indicator;
use crate::control::shared::SharedState;
use crate::interface::fix::FixInfo;
use crate::interface::radio::{RadioEvent, RadioListener};
use crate::telemetry::log::StatusLog;
use std::sync::Arc;

/// Reacts to radio notifications. Only raises flags, sets the fix and sending
/// indicators, and overwrites the last fix; never blocks.
pub struct RadioEventHandler {
    shared: Arc<SharedState>,
    logger: StatusLog,
}

impl RadioEventHandler {
    pub fn new(shared: Arc<SharedState>) -> Self {
        Self {
            shared,
            logger: StatusLog::with_target("sight::radio"),
        }
    }
}

impl RadioListener for RadioEventHandler {
    fn on_event(&self, event: RadioEvent) {
        self.logger.record(&format!("[radio] {}", event));
        let indicators = &self.shared.indicators;
        let flags = &self.shared.flags;
        match event {
            RadioEvent::FixTimeout => flags.raise_gnss_timeout(),
            RadioEvent::Idle => indicators.set(Indicator::Sending, false),
            RadioEvent::WindowApproaching => flags.raise_window_approaching(),
            RadioEvent::SendingStarted => indicators.set(Indicator::Sending, true),
            RadioEvent::FixLost => indicators.set(Indicator::Fix, false),
            RadioEvent::FixAcquired => {
                indicators.set(Indicator::Fix, true);
                flags.clear_gnss_timeout();
            }
            RadioEvent::InternalFault => self.logger.error("[radio] internal fault reported"),
        }
    }

    fn on_fix(&self, fix: FixInfo) {
        if fix.valid {
            self.logger.record(&format!(
                "[fix] utc {} lat {:.5} lon {:.5} quality {} sats {}",
                fix.utc, fix.latitude, fix.longitude, fix.quality, fix.satellites
            ));
        } else {
            self.logger.warn(&format!("[fix] invalid fix at utc {:?}", fix.utc));
        }
        self.shared.store_fix(fix);
    }
}
