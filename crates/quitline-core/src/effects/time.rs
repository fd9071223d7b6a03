//! Wall-clock trait
//!
//! Streak arithmetic and timeout scheduling read time through this trait so
//! tests can drive a simulated clock.

use crate::errors::TimeError;
use async_trait::async_trait;
use std::sync::Arc;

/// Physical wall-clock access.
#[async_trait]
pub trait PhysicalTimeEffects: Send + Sync {
    /// Current Unix timestamp in seconds.
    async fn unix_now(&self) -> Result<u64, TimeError>;

    /// Sleep for the given number of milliseconds.
    async fn sleep_ms(&self, ms: u64);
}

#[async_trait]
impl<T: PhysicalTimeEffects + ?Sized> PhysicalTimeEffects for Arc<T> {
    async fn unix_now(&self) -> Result<u64, TimeError> {
        (**self).unix_now().await
    }

    async fn sleep_ms(&self, ms: u64) {
        (**self).sleep_ms(ms).await;
    }
}
