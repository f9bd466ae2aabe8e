//! Automatic drop pacing.
//!
//! Each spawn moves the drop delay 1% of the way from its current value toward
//! the minimum, so the game speeds up gradually and never drops below it.

use std::time::Duration;

use tracing::debug;

const EASE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropPace {
    base_ms: f64,
    min_ms: f64,
    current_ms: f64,
}

impl DropPace {
    pub fn new(base_ms: u64, min_ms: u64) -> Self {
        let min_ms = min_ms.min(base_ms) as f64;
        let base_ms = base_ms as f64;
        Self {
            base_ms,
            min_ms,
            current_ms: base_ms,
        }
    }

    pub fn current(&self) -> Duration {
        Duration::from_secs_f64(self.current_ms / 1000.0)
    }

    pub fn current_ms(&self) -> u64 {
        self.current_ms.round() as u64
    }

    pub fn on_spawn(&mut self) {
        self.current_ms += (self.min_ms - self.current_ms) * EASE;
        debug!(drop_ms = self.current_ms, "drop pace eased");
    }

    pub fn reset(&mut self) {
        self.current_ms = self.base_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eases_toward_minimum() {
        let mut pace = DropPace::new(1000, 150);
        assert_eq!(pace.current_ms(), 1000);
        pace.on_spawn();
        // 1000 + (150 - 1000) * 0.01
        assert_eq!(pace.current_ms(), 992);
        for _ in 0..2000 {
            pace.on_spawn();
        }
        assert_eq!(pace.current_ms(), 150);
    }

    #[test]
    fn reset_restores_base() {
        let mut pace = DropPace::new(500, 100);
        pace.on_spawn();
        pace.reset();
        assert_eq!(pace.current(), Duration::from_millis(500));
    }

    #[test]
    fn minimum_is_clamped_to_base() {
        let mut pace = DropPace::new(200, 900);
        pace.on_spawn();
        assert_eq!(pace.current_ms(), 200);
    }
}
