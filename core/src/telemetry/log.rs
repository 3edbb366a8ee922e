use log::{debug, error, info, warn};

/// Line-oriented diagnostic stream. Human-readable only; not a wire format.
#[derive(Debug, Clone, Copy)]
pub struct StatusLog {
    target: &'static str,
}

impl StatusLog {
    pub fn new() -> Self {
        Self { target: "sight" }
    }

    pub fn with_target(target: &'static str) -> Self {
        Self { target }
    }

    pub fn record(&self, message: &str) {
        info!(target: self.target, "{}", message);
    }

    pub fn warn(&self, message: &str) {
        warn!(target: self.target, "{}", message);
    }

    pub fn error(&self, message: &str) {
        error!(target: self.target, "{}", message);
    }

    pub fn debug(&self, message: &str) {
        debug!(target: self.target, "{}", message);
    }

    pub fn recognition(&self, score: f32) {
        info!(target: self.target, "[recognition] value: {}", score);
    }
}

impl Default for StatusLog {
    fn default() -> Self {
        Self::new()
    }
}
