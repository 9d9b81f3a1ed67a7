use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::application::ports::SessionStore;

/// Evicts sessions idle longer than `idle_timeout`, checking every `period`.
/// Runs until the returned task is aborted or the runtime shuts down.
pub fn spawn_idle_session_sweeper(
    store: Arc<dyn SessionStore>,
    idle_timeout: Duration,
    period: Duration,
) -> JoinHandle<()> {
    let period = period.max(Duration::from_millis(1));

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            match store.evict_idle(idle_timeout).await {
                Ok(0) => {}
                Ok(evicted) => {
                    let remaining = store.count().await;
                    tracing::info!(evicted, remaining, "Evicted idle sessions");
                }
                Err(e) => tracing::error!(error = %e, "Idle session sweep failed"),
            }
        }
    })
}
