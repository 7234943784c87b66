//! Manual crawl trigger.

use console::style;

use crate::config::Settings;
use crate::crawler::CrawlError;

use super::helpers::build_service;

/// Run one crawl pass and print the summary.
pub async fn cmd_crawl(settings: &Settings) -> anyhow::Result<()> {
    let service = build_service(settings)?;

    println!("{} Crawl starting…", style("→").cyan());

    let summary = match service.run().await {
        Ok(summary) => summary,
        Err(CrawlError::AlreadyRunning) => {
            println!("{} A crawl is already in progress", style("!").yellow());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("\n{}", style("Crawl Summary").bold());
    println!("{}", "-".repeat(40));
    println!("  Sites crawled:      {}", summary.sites_crawled);
    println!("  Sites failed:       {}", summary.sites_failed);
    println!("  Links discovered:   {}", summary.links_discovered);
    println!("  Recipes added:      {}", style(summary.recipes_added).green());
    println!("  Duplicates skipped: {}", summary.duplicates_skipped);
    println!("  Links failed:       {}", summary.links_failed);

    Ok(())
}
