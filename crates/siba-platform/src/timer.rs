//! Typing-delay timer backed by `setTimeout` through gloo-timers.

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;

use siba_core::ports::DelayPort;

/// Single-shot browser timeout. Each `sleep` schedules one JS timer; the
/// conversation guarantees at most one is outstanding.
pub struct TimeoutDelay;

impl TimeoutDelay {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TimeoutDelay {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl DelayPort for TimeoutDelay {
    async fn sleep(&self, ms: u32) {
        log::trace!("typing delay {}ms", ms);
        TimeoutFuture::new(ms).await;
    }
}
