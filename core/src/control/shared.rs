use crate::control::flags::CoordinationFlags;
use crate::control::indicators::IndicatorBank;
use crate::interface::fix::FixInfo;
use std::sync::{Arc, RwLock};

/// Everything the radio callback and the main cycle both touch. Lives for the
/// whole process, created once at start-up.
#[derive(Debug, Default)]
pub struct SharedState {
    pub flags: CoordinationFlags,
    pub indicators: Arc<IndicatorBank>,
    fix: RwLock<FixInfo>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the last known fix. Only the radio handler calls this.
    pub fn store_fix(&self, fix: FixInfo) {
        if let Ok(mut guard) = self.fix.write() {
            *guard = fix;
        }
    }

    pub fn last_fix(&self) -> FixInfo {
        self.fix
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}
