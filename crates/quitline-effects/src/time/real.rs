//! Real time effect handler for production use

use async_trait::async_trait;
use quitline_core::effects::PhysicalTimeEffects;
use quitline_core::TimeError;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Wall-clock handler backed by the system clock and the tokio timer.
#[derive(Debug, Clone, Default)]
pub struct RealTimeHandler;

impl RealTimeHandler {
    /// Create a new real time handler.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PhysicalTimeEffects for RealTimeHandler {
    async fn unix_now(&self) -> Result<u64, TimeError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .map_err(|e| TimeError::Unavailable(e.to_string()))
    }

    async fn sleep_ms(&self, ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}
