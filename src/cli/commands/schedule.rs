//! Recurring crawl command.

use std::sync::Arc;
use std::time::Duration;

use console::style;
use tracing::info;

use crate::config::Settings;
use crate::crawler::schedule::run_scheduler;

use super::helpers::build_service;

/// Run crawls on a recurring cadence until ctrl-c.
pub async fn cmd_schedule(settings: &Settings, every_hours: Option<u64>) -> anyhow::Result<()> {
    let interval = match every_hours {
        Some(hours) => Duration::from_secs(hours * 3600),
        None => settings.schedule_interval(),
    };

    let service = Arc::new(build_service(settings)?);

    println!(
        "{} Scheduling a crawl every {} hours (ctrl-c to stop)",
        style("→").cyan(),
        interval.as_secs() / 3600
    );

    tokio::select! {
        _ = run_scheduler(service, interval) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown requested");
            println!("\n{} Scheduler stopped", style("✓").green());
        }
    }

    Ok(())
}
