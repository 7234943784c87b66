//! Crawler core.
//!
//! Selector-driven discovery and extraction of structured recipes, built
//! from small single-purpose pieces: URL normalization, resilient fetching,
//! the selector engine, link discovery, per-page extraction, the site
//! analyzer, and the orchestrator that drives a full run.

pub mod analyze;
pub mod discovery;
pub mod extract;
pub mod fetch;
pub mod run;
pub mod schedule;
pub mod selectors;
pub mod url;

pub use analyze::{analyze_site, AnalyzeError, SiteAnalysis};
pub use fetch::{FetchError, HttpFetcher, PageFetcher, USER_AGENT};
pub use run::{CrawlError, CrawlService, Crawler, RunSummary};
