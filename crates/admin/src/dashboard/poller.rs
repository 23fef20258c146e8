//! Periodic system metrics refresh.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::Inner;

/// Re-fetch system metrics every `period` until the dashboard is deactivated.
///
/// The first tick is skipped: activation has already fetched once.
pub(super) async fn poll_metrics(inner: Arc<Inner>, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await;

    loop {
        tokio::select! {
            biased;
            () = inner.cancel.cancelled() => break,
            _ = interval.tick() => inner.refresh_system_metrics().await,
        }
    }

    debug!("Metrics poller stopped");
}
