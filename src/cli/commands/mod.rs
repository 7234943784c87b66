//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific
//! modules.

mod analyze;
mod crawl;
mod helpers;
mod init;
mod schedule;
mod site;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "harvest")]
#[command(about = "Recipe site crawler")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and seed default sites
    Init,

    /// Manage crawled sites
    Site {
        #[command(subcommand)]
        command: SiteCommands,
    },

    /// Run one crawl pass over all enabled sites
    Crawl,

    /// Suggest a selector configuration for an unconfigured site
    Analyze {
        /// Listing page URL to analyze
        url: String,

        /// Save the suggested configuration as a new site
        #[arg(long)]
        save: bool,
    },

    /// Run crawls on a recurring schedule until interrupted
    Schedule {
        /// Hours between crawl passes (overrides config)
        #[arg(long)]
        every: Option<u64>,
    },
}

#[derive(Subcommand)]
enum SiteCommands {
    /// List configured sites
    List,

    /// Add a site from a selector configuration file
    Add {
        /// Unique site name
        name: String,
        /// Listing page URL
        url: String,
        /// Path to a JSON file with the selector configuration
        #[arg(long)]
        selectors: PathBuf,
    },

    /// Enable a site
    Enable { name: String },

    /// Disable a site
    Disable { name: String },

    /// Remove a site
    Remove {
        name: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    std::fs::create_dir_all(&settings.data_dir)?;

    match cli.command {
        Commands::Init => init::cmd_init(&settings).await,
        Commands::Site { command } => match command {
            SiteCommands::List => site::cmd_site_list(&settings).await,
            SiteCommands::Add {
                name,
                url,
                selectors,
            } => site::cmd_site_add(&settings, &name, &url, &selectors).await,
            SiteCommands::Enable { name } => site::cmd_site_set_enabled(&settings, &name, true).await,
            SiteCommands::Disable { name } => {
                site::cmd_site_set_enabled(&settings, &name, false).await
            }
            SiteCommands::Remove { name, yes } => site::cmd_site_remove(&settings, &name, yes).await,
        },
        Commands::Crawl => crawl::cmd_crawl(&settings).await,
        Commands::Analyze { url, save } => analyze::cmd_analyze(&settings, &url, save).await,
        Commands::Schedule { every } => schedule::cmd_schedule(&settings, every).await,
    }
}
