use serde::{Deserialize, Serialize};
use sightcore::interface::fix::FixInfo;
use sightcore::interface::radio::{RadioEvent, RadioLink, RadioListener, RadioMode};
use sightcore::processing::payload::Payload;
use sightcore::DeviceError;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// Scripted behaviour of the simulated radio, in whole seconds since `begin`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioSchedule {
    /// GPS-epoch seconds reported by the radio clock at `begin`.
    pub clock_start: u64,
    pub fix_timeout_after_secs: Option<u64>,
    pub fix_acquired_after_secs: Option<u64>,
    pub fix_lost_after_secs: Option<u64>,
    pub window_period_secs: u64,
    /// How long before a window opens the approach notice fires.
    pub window_lead_secs: u64,
    /// GGA sentence delivered on the fix channel when the fix is acquired.
    pub gga: String,
    pub fail_begin: bool,
}

impl Default for RadioSchedule {
    fn default() -> Self {
        Self {
            clock_start: 1_400_000_000,
            fix_timeout_after_secs: Some(3),
            fix_acquired_after_secs: Some(8),
            fix_lost_after_secs: None,
            window_period_secs: 10,
            window_lead_secs: 2,
            gga: "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47".into(),
            fail_begin: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    Event(RadioEvent),
    DeliverFix,
}

impl RadioSchedule {
    /// What happens at `second` (1-based) after `begin`.
    pub fn actions_at(&self, second: u64) -> Vec<ScheduledAction> {
        let mut actions = Vec::new();
        if self.fix_timeout_after_secs == Some(second) {
            actions.push(ScheduledAction::Event(RadioEvent::FixTimeout));
        }
        if self.fix_acquired_after_secs == Some(second) {
            actions.push(ScheduledAction::DeliverFix);
            actions.push(ScheduledAction::Event(RadioEvent::FixAcquired));
        }
        if self.fix_lost_after_secs == Some(second) {
            actions.push(ScheduledAction::Event(RadioEvent::FixLost));
        }

        let period = self.window_period_secs;
        if period > 0 {
            let phase = second % period;
            if self.window_lead_secs > 0
                && self.window_lead_secs < period
                && phase == period - self.window_lead_secs
            {
                actions.push(ScheduledAction::Event(RadioEvent::WindowApproaching));
            }
            if phase == 0 {
                actions.push(ScheduledAction::Event(RadioEvent::SendingStarted));
            }
            if period > 1 && phase == 1 && second > 1 {
                actions.push(ScheduledAction::Event(RadioEvent::Idle));
            }
        }
        actions
    }
}

#[derive(Default)]
struct LinkState {
    pending: Option<Payload>,
    transmitted: Vec<Payload>,
}

/// Handle onto what the simulated radio has put on the air.
#[derive(Clone, Default)]
pub struct Transmissions {
    link: Arc<Mutex<LinkState>>,
}

impl Transmissions {
    pub fn snapshot(&self) -> Vec<Payload> {
        self.link
            .lock()
            .map(|link| link.transmitted.clone())
            .unwrap_or_default()
    }

    fn transmit(&self) {
        if let Ok(mut link) = self.link.lock() {
            if let Some(payload) = link.pending {
                log::info!("[air] transmitting {}", payload.hex());
                link.transmitted.push(payload);
            }
        }
    }
}

/// Radio/positioning stand-in that replays a `RadioSchedule` on a tokio task.
pub struct SimRadio {
    schedule: RadioSchedule,
    transmissions: Transmissions,
    started: Option<Instant>,
    task: Option<JoinHandle<()>>,
}

impl SimRadio {
    pub fn new(schedule: RadioSchedule) -> Self {
        Self {
            schedule,
            transmissions: Transmissions::default(),
            started: None,
            task: None,
        }
    }

    pub fn transmissions(&self) -> Transmissions {
        self.transmissions.clone()
    }
}

impl RadioLink for SimRadio {
    fn begin(
        &mut self,
        mode: RadioMode,
        listener: Arc<dyn RadioListener>,
    ) -> Result<(), DeviceError> {
        if self.schedule.fail_begin {
            return Err(DeviceError::Unavailable("radio module not responding".into()));
        }
        let handle = Handle::try_current()
            .map_err(|err| DeviceError::Unavailable(format!("no async runtime: {}", err)))?;
        let fix = FixInfo::from_gga(&self.schedule.gga)
            .map_err(|err| DeviceError::Failed(format!("scripted fix: {}", err)))?;

        log::info!("simulated radio starting in {:?} mode", mode);
        let schedule = self.schedule.clone();
        let transmissions = self.transmissions.clone();
        let start = Instant::now();
        self.started = Some(start);

        self.task = Some(handle.spawn(async move {
            let step = Duration::from_secs(1);
            let mut interval = time::interval_at(start + step, step);
            let mut second = 0u64;
            loop {
                interval.tick().await;
                second += 1;
                for action in schedule.actions_at(second) {
                    match action {
                        ScheduledAction::Event(event) => {
                            if event == RadioEvent::SendingStarted {
                                transmissions.transmit();
                            }
                            listener.on_event(event);
                        }
                        ScheduledAction::DeliverFix => listener.on_fix(fix.clone()),
                    }
                }
            }
        }));
        Ok(())
    }

    fn clock_seconds(&self) -> Result<u64, DeviceError> {
        let start = self
            .started
            .ok_or_else(|| DeviceError::Unavailable("radio not started".into()))?;
        Ok(self.schedule.clock_start + start.elapsed().as_secs())
    }

    fn set_next_payload(&mut self, payload: &Payload) {
        if let Ok(mut link) = self.transmissions.link.lock() {
            link.pending = Some(*payload);
        }
    }
}

impl Drop for SimRadio {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
