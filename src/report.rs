//! Human-facing reporting: byte sizes and phase timings.

use std::time::{Duration, Instant};

/// Formats a byte count with decimal units, e.g. `1.50 KB`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1000 {
        format!("{} B", bytes)
    } else if bytes < 1000 * 1000 {
        format!("{:.2} KB", bytes as f64 / 1000.0)
    } else {
        format!("{:.2} MB", bytes as f64 / (1000.0 * 1000.0))
    }
}

/// Measures consecutive phases of a run and logs each one.
#[derive(Debug)]
pub struct PhaseTimer {
    start: Instant,
    recent: Instant,
}

impl PhaseTimer {
    pub fn start() -> Self {
        let now = Instant::now();
        PhaseTimer {
            start: now,
            recent: now,
        }
    }

    /// Time since the previous call, or since the timer started.
    pub fn section(&mut self, name: &str) -> Duration {
        let now = Instant::now();
        let elapsed = now - self.recent;
        self.recent = now;
        log::info!("{}: {} microseconds", name, elapsed.as_micros());
        elapsed
    }

    pub fn total(&self) -> Duration {
        self.start.elapsed()
    }
}
