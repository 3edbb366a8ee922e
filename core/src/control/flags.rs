use std::sync::atomic::{AtomicBool, Ordering};

/// Hand-off signals from the radio callback to the main cycle.
///
/// The radio handler is the only writer that raises a flag. The main cycle
/// consumes `window_approaching` with an atomic swap, so a signal that
/// arrives mid-tick survives until the next tick. `gnss_timeout` is a level
/// condition that the cycle only reads; the handler clears it on fix.
#[derive(Debug, Default)]
pub struct CoordinationFlags {
    gnss_timeout: AtomicBool,
    window_approaching: AtomicBool,
}

impl CoordinationFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise_gnss_timeout(&self) {
        self.gnss_timeout.store(true, Ordering::Release);
    }

    pub fn clear_gnss_timeout(&self) {
        self.gnss_timeout.store(false, Ordering::Release);
    }

    pub fn gnss_timeout(&self) -> bool {
        self.gnss_timeout.load(Ordering::Acquire)
    }

    pub fn raise_window_approaching(&self) {
        self.window_approaching.store(true, Ordering::Release);
    }

    pub fn window_approaching(&self) -> bool {
        self.window_approaching.load(Ordering::Acquire)
    }

    /// Reads and clears the window signal in one step.
    pub fn take_window_approaching(&self) -> bool {
        self.window_approaching.swap(false, Ordering::AcqRel)
    }
}
