//! Injectable timer used by the processing driver.

use std::{future::Future, pin::Pin, time::Duration};

/// Future returned by [`Clock::sleep`].
pub type Sleep = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Source of delays between progress ticks.
pub trait Clock: Send + Sync {
    fn sleep(&self, duration: Duration) -> Sleep;
}

/// Real timer backed by `tokio::time`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn sleep(&self, duration: Duration) -> Sleep {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Clock whose sleeps complete immediately.
///
/// Used by tests and by non-interactive runs where simulated latency only
/// slows things down.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantClock;

impl Clock for InstantClock {
    fn sleep(&self, _duration: Duration) -> Sleep {
        Box::pin(tokio::task::yield_now())
    }
}
