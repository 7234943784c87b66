//! RecipeHarvest - recipe site crawler.
//!
//! Crawls configured recipe websites, extracts structured recipe data
//! via CSS selectors, and stores the results in a local database.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recipeharvest::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if cli::is_verbose() {
        "recipeharvest=info"
    } else {
        "recipeharvest=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Run CLI
    cli::run().await
}
