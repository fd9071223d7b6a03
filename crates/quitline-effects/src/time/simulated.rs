//! Simulated time effect handler for testing

use async_trait::async_trait;
use parking_lot::Mutex;
use quitline_core::effects::PhysicalTimeEffects;
use quitline_core::TimeError;
use std::sync::Arc;
use std::time::Duration;

/// Simulated clock for tests and the simulator.
///
/// `unix_now` reads a shared value that tests advance explicitly; `sleep_ms`
/// still yields to the tokio timer (instant under a paused test runtime) and
/// then advances the simulated clock by the slept amount.
#[derive(Debug, Clone)]
pub struct SimulatedTimeHandler {
    /// Current simulated time in seconds.
    current_time: Arc<Mutex<u64>>,
}

impl SimulatedTimeHandler {
    /// Create a simulated clock starting at the given Unix timestamp.
    pub fn new(start_time: u64) -> Self {
        Self {
            current_time: Arc::new(Mutex::new(start_time)),
        }
    }

    /// Create a simulated clock starting at the Unix epoch.
    pub fn new_at_epoch() -> Self {
        Self::new(0)
    }

    /// Advance simulated time by the given number of seconds.
    pub fn advance(&self, secs: u64) {
        *self.current_time.lock() += secs;
    }

    /// Set the absolute simulated time.
    pub fn set_time(&self, time: u64) {
        *self.current_time.lock() = time;
    }

    /// Get the current simulated time.
    pub fn get_time(&self) -> u64 {
        *self.current_time.lock()
    }
}

impl Default for SimulatedTimeHandler {
    fn default() -> Self {
        Self::new_at_epoch()
    }
}

#[async_trait]
impl PhysicalTimeEffects for SimulatedTimeHandler {
    async fn unix_now(&self) -> Result<u64, TimeError> {
        Ok(*self.current_time.lock())
    }

    async fn sleep_ms(&self, ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        self.advance(ms / 1000);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn advance_moves_the_clock() {
        let clock = SimulatedTimeHandler::new(1_000);
        assert_eq!(clock.unix_now().await.expect("clock available"), 1_000);
        clock.advance(500);
        assert_eq!(clock.unix_now().await.expect("clock available"), 1_500);
        clock.set_time(42);
        assert_eq!(clock.get_time(), 42);
    }
}
