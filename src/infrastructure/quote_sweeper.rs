use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::ports::{Clock, QuoteRepository};

const MIN_SWEEP_PERIOD: Duration = Duration::from_millis(1);

/// Periodically drop expired quotes so entries nobody reads again do not
/// pile up. Reads still evict lazily on their own.
pub fn spawn_quote_sweeper<R>(repo: R, clock: Arc<dyn Clock>, every: Duration) -> JoinHandle<()>
where
    R: QuoteRepository,
{
    // tokio's interval panics on a zero period.
    let every = every.max(MIN_SWEEP_PERIOD);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match repo.purge_expired(clock.now()) {
                Ok(0) => {}
                Ok(removed) => log::info!("Purged {} expired quote(s)", removed),
                Err(e) => log::error!("Quote sweep failed: {}", e),
            }
        }
    })
}
