//! Shared helpers for CLI commands.

use std::sync::Arc;

use crate::config::Settings;
use crate::crawler::{CrawlService, Crawler, HttpFetcher};
use crate::repository::{RecipeRepository, SiteRepository};

/// Truncate a string for table display.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Wire up the crawl service from settings.
pub fn build_service(settings: &Settings) -> anyhow::Result<CrawlService> {
    let db_path = settings.database_path();
    let sites = SiteRepository::new(&db_path)?;
    let recipes = RecipeRepository::new(&db_path)?;
    let fetcher = Arc::new(HttpFetcher::new(&settings.crawl));

    Ok(CrawlService::new(Crawler::new(
        fetcher,
        sites,
        recipes,
        settings.request_delay(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly-te", 10), "exactly-te");
        assert_eq!(truncate("longer than that", 10), "longer th…");
    }
}
