//! Recurring crawl scheduling.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use super::run::{CrawlError, CrawlService};

/// Run crawls on a fixed cadence until the task is cancelled.
///
/// The first tick fires immediately, then every `interval`. A tick that
/// lands while the previous run is still executing is skipped by the
/// service's single-flight guard rather than queued.
pub async fn run_scheduler(service: Arc<CrawlService>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        info!("scheduled crawl starting");

        match service.run().await {
            Ok(summary) => info!(
                recipes_added = summary.recipes_added,
                duplicates_skipped = summary.duplicates_skipped,
                sites_failed = summary.sites_failed,
                "scheduled crawl finished"
            ),
            Err(CrawlError::AlreadyRunning) => {
                warn!("previous crawl still running; skipping this tick");
            }
            Err(e) => {
                // The next scheduled run is unaffected by a failed one
                error!(error = %e, "scheduled crawl failed");
            }
        }
    }
}
