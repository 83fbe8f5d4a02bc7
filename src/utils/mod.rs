use std::time::Instant;
use tracing::info;

/// Logs when a report run starts and how long it took when dropped.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    pub fn start(label: &'static str) -> Self {
        info!("⏱  {}: started", label);
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        info!("⏱  {}: done in {:.2?}", self.label, self.start.elapsed());
    }
}
