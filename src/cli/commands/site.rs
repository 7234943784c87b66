//! Site management commands.

use std::path::Path;

use console::style;

use crate::config::Settings;
use crate::models::{SelectorConfig, SiteConfig};
use crate::repository::{RecipeRepository, SiteRepository};

use super::helpers::truncate;

/// List configured sites.
pub async fn cmd_site_list(settings: &Settings) -> anyhow::Result<()> {
    let db_path = settings.database_path();
    let site_repo = SiteRepository::new(&db_path)?;
    let recipe_repo = RecipeRepository::new(&db_path)?;

    let sites = site_repo.get_all()?;
    if sites.is_empty() {
        println!(
            "{} No sites configured. Run 'harvest init' first.",
            style("!").yellow()
        );
        return Ok(());
    }

    println!("\n{}", style("Crawled Sites").bold());
    println!("{}", "-".repeat(72));
    println!(
        "{:<22} {:<8} {:>8} {:<18} Last Crawl",
        "Name", "Enabled", "Recipes", "URL"
    );
    println!("{}", "-".repeat(72));

    for site in sites {
        let last_crawl = site
            .last_crawl
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "Never".to_string());
        let recipes = recipe_repo.count_by_source(&site.name)?;

        println!(
            "{:<22} {:<8} {:>8} {:<18} {}",
            truncate(&site.name, 21),
            if site.enabled { "yes" } else { "no" },
            recipes,
            truncate(&site.url, 17),
            last_crawl
        );
    }

    Ok(())
}

/// Add a site from a selector configuration file.
pub async fn cmd_site_add(
    settings: &Settings,
    name: &str,
    url: &str,
    selectors_path: &Path,
) -> anyhow::Result<()> {
    let site_repo = SiteRepository::new(&settings.database_path())?;

    if site_repo.get_by_name(name)?.is_some() {
        println!("{} Site '{}' already exists", style("✗").red(), name);
        return Ok(());
    }

    let contents = std::fs::read_to_string(selectors_path)?;
    let selectors: SelectorConfig = serde_json::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("invalid selector config: {}", e))?;

    let site = SiteConfig::new(name.to_string(), url.to_string(), selectors);
    site_repo.save(&site)?;

    println!("{} Added site '{}'", style("✓").green(), name);
    Ok(())
}

/// Enable or disable a site by name.
pub async fn cmd_site_set_enabled(
    settings: &Settings,
    name: &str,
    enabled: bool,
) -> anyhow::Result<()> {
    let site_repo = SiteRepository::new(&settings.database_path())?;

    let Some(site) = site_repo.get_by_name(name)? else {
        println!("{} Site '{}' not found", style("✗").red(), name);
        return Ok(());
    };

    site_repo.set_enabled(&site.id, enabled)?;
    println!(
        "{} Site '{}' {}",
        style("✓").green(),
        name,
        if enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}

/// Remove a site.
pub async fn cmd_site_remove(settings: &Settings, name: &str, confirm: bool) -> anyhow::Result<()> {
    use std::io::{self, Write};

    let site_repo = SiteRepository::new(&settings.database_path())?;

    let Some(site) = site_repo.get_by_name(name)? else {
        println!("{} Site '{}' not found", style("✗").red(), name);
        return Ok(());
    };

    if !confirm {
        print!("Remove site '{}'? Stored recipes are kept. [y/N] ", name);
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("Aborted");
            return Ok(());
        }
    }

    site_repo.delete(&site.id)?;
    println!("{} Removed site '{}'", style("✓").green(), name);
    Ok(())
}
