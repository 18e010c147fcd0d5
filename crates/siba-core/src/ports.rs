//! Port traits — the boundary between the core and the browser.
//!
//! Implementations live in `siba-platform`. Tests supply instant or
//! scripted versions.

use async_trait::async_trait;

/// Suspends the current task. The browser adapter wraps a JS timeout.
#[async_trait(?Send)]
pub trait DelayPort {
    async fn sleep(&self, ms: u32);
}

/// Source of uniform samples in `[0, 1)`.
pub trait EntropyPort {
    fn next_unit(&self) -> f64;
}
