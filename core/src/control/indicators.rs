use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// The four logical indicator outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Running,
    Fix,
    Sending,
    Error,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndicatorSnapshot {
    pub running: bool,
    pub fix: bool,
    pub sending: bool,
    pub error: bool,
}

/// Logical state of the indicator lights, shared by both execution contexts.
#[derive(Debug, Default)]
pub struct IndicatorBank {
    running: AtomicBool,
    fix: AtomicBool,
    sending: AtomicBool,
    error: AtomicBool,
    writes: AtomicUsize,
}

impl IndicatorBank {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, indicator: Indicator) -> &AtomicBool {
        match indicator {
            Indicator::Running => &self.running,
            Indicator::Fix => &self.fix,
            Indicator::Sending => &self.sending,
            Indicator::Error => &self.error,
        }
    }

    pub fn set(&self, indicator: Indicator, on: bool) {
        self.slot(indicator).store(on, Ordering::Release);
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    /// Flips the indicator and returns its new level.
    pub fn toggle(&self, indicator: Indicator) -> bool {
        let previous = self.slot(indicator).fetch_xor(true, Ordering::AcqRel);
        self.writes.fetch_add(1, Ordering::Relaxed);
        !previous
    }

    pub fn get(&self, indicator: Indicator) -> bool {
        self.slot(indicator).load(Ordering::Acquire)
    }

    /// Total number of writes since start; used to audit terminal states.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> IndicatorSnapshot {
        IndicatorSnapshot {
            running: self.get(Indicator::Running),
            fix: self.get(Indicator::Fix),
            sending: self.get(Indicator::Sending),
            error: self.get(Indicator::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_counts_writes() {
        let bank = IndicatorBank::new();
        assert!(bank.toggle(Indicator::Error));
        assert!(!bank.toggle(Indicator::Error));
        bank.set(Indicator::Fix, true);
        assert_eq!(bank.writes(), 3);
        assert_eq!(
            bank.snapshot(),
            IndicatorSnapshot {
                fix: true,
                ..Default::default()
            }
        );
    }
}
