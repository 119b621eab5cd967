use std::time::Duration;

use crate::client::BoxFuture;

/// Pause inserted between consecutive dispatches to bound the outbound rate.
pub trait Throttle: Send + Sync {
    fn pause(&self) -> BoxFuture<'_, ()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Sleep for a constant duration.
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    pub const DEFAULT: Duration = Duration::from_millis(500);
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl Throttle for FixedDelay {
    fn pause(&self) -> BoxFuture<'_, ()> {
        Box::pin(tokio::time::sleep(self.0))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Never waits.
pub struct NoDelay;

impl Throttle for NoDelay {
    fn pause(&self) -> BoxFuture<'_, ()> {
        Box::pin(std::future::ready(()))
    }
}
