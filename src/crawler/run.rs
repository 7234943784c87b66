//! Crawl orchestration.
//!
//! Sites are processed strictly sequentially, and links within a site are
//! processed strictly sequentially with a fixed courtesy delay before each
//! detail fetch. The delay is a politeness contract with third-party sites
//! and must not be parallelized away.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use scraper::Html;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::discovery::discover_links;
use super::extract::extract_recipe;
use super::fetch::{FetchError, PageFetcher};
use crate::models::{Recipe, SiteConfig};
use crate::repository::{RecipeRepository, RepositoryError, SiteRepository};

/// Run-level crawl failure.
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// Another run holds the single-flight guard.
    #[error("a crawl is already in progress")]
    AlreadyRunning,
    /// The site configuration store could not be read at all.
    #[error("storage error: {0}")]
    Store(#[from] RepositoryError),
}

/// Per-site failure, caught at the site-iteration boundary.
#[derive(Debug, thiserror::Error)]
enum SiteCrawlError {
    #[error("listing fetch failed: {0}")]
    Listing(#[from] FetchError),
    #[error("storage error: {0}")]
    Store(#[from] RepositoryError),
}

/// Outcome counters for one crawl run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sites_crawled: usize,
    pub sites_failed: usize,
    pub links_discovered: usize,
    pub recipes_added: usize,
    pub duplicates_skipped: usize,
    pub links_failed: usize,
}

/// The crawl orchestrator.
pub struct Crawler {
    fetcher: Arc<dyn PageFetcher>,
    sites: SiteRepository,
    recipes: RecipeRepository,
    request_delay: Duration,
}

impl Crawler {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        sites: SiteRepository,
        recipes: RecipeRepository,
        request_delay: Duration,
    ) -> Self {
        Self {
            fetcher,
            sites,
            recipes,
            request_delay,
        }
    }

    /// Run one full crawl pass over every enabled site.
    ///
    /// One site's total failure never aborts the run; only a failure to
    /// read the site store at all propagates. A run with no enabled sites
    /// is a valid no-op.
    pub async fn run(&self) -> Result<RunSummary, CrawlError> {
        let sites = self.sites.get_enabled()?;
        let mut summary = RunSummary::default();

        if sites.is_empty() {
            info!("no enabled sites; nothing to crawl");
            return Ok(summary);
        }

        info!(site_count = sites.len(), "crawl run starting");

        for site in &sites {
            match self.crawl_site(site, &mut summary).await {
                Ok(()) => summary.sites_crawled += 1,
                Err(e) => {
                    warn!(site = %site.name, error = %e, "site crawl failed, continuing");
                    summary.sites_failed += 1;
                }
            }

            // A pass was attempted, not necessarily completed: the
            // timestamp is updated even when the pass failed.
            if let Err(e) = self.sites.update_last_crawl(&site.id, Utc::now()) {
                warn!(site = %site.name, error = %e, "failed to update last crawl timestamp");
            }
        }

        info!(
            sites_crawled = summary.sites_crawled,
            sites_failed = summary.sites_failed,
            recipes_added = summary.recipes_added,
            duplicates_skipped = summary.duplicates_skipped,
            links_failed = summary.links_failed,
            "crawl run complete"
        );

        Ok(summary)
    }

    async fn crawl_site(
        &self,
        site: &SiteConfig,
        summary: &mut RunSummary,
    ) -> Result<(), SiteCrawlError> {
        info!(site = %site.name, url = %site.url, "crawling site");

        let listing = self.fetcher.fetch_page(&site.url).await?;
        let links = {
            let document = Html::parse_document(&listing);
            discover_links(&document, &site.selectors.recipe_links, &site.url)
        };

        info!(site = %site.name, link_count = links.len(), "discovered candidate links");
        summary.links_discovered += links.len();

        for link in links {
            // Courtesy delay before every detail fetch
            tokio::time::sleep(self.request_delay).await;

            let Some(extracted) = extract_recipe(self.fetcher.as_ref(), &link, &site.selectors)
                .await
            else {
                summary.links_failed += 1;
                continue;
            };

            if self.recipes.exists(&extracted.title, &site.name)? {
                debug!(site = %site.name, title = %extracted.title, "duplicate recipe, skipping");
                summary.duplicates_skipped += 1;
                continue;
            }

            let recipe = Recipe::from_extracted(extracted, &site.name);
            self.recipes.insert(&recipe)?;
            info!(site = %site.name, title = %recipe.title, "stored new recipe");
            summary.recipes_added += 1;
        }

        Ok(())
    }
}

/// Single-flight wrapper around the orchestrator.
///
/// The schedule and the manual trigger share one entry point; overlapping
/// runs could double-insert before a dedup row lands, so a second caller is
/// rejected instead of queued.
pub struct CrawlService {
    crawler: Crawler,
    guard: Mutex<()>,
}

impl CrawlService {
    pub fn new(crawler: Crawler) -> Self {
        Self {
            crawler,
            guard: Mutex::new(()),
        }
    }

    /// Run a crawl unless one is already in progress.
    pub async fn run(&self) -> Result<RunSummary, CrawlError> {
        let _guard = self
            .guard
            .try_lock()
            .map_err(|_| CrawlError::AlreadyRunning)?;
        self.crawler.run().await
    }
}
