//! Selector auto-suggestion command.

use console::style;

use crate::config::Settings;
use crate::crawler::{analyze_site, HttpFetcher};
use crate::models::SiteConfig;
use crate::repository::SiteRepository;

use super::helpers::truncate;

/// Analyze a listing page, print the suggested configuration and sample
/// preview, and optionally save it as a new site.
pub async fn cmd_analyze(settings: &Settings, url: &str, save: bool) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new(&settings.crawl);

    println!("{} Analyzing {}", style("→").cyan(), url);
    let analysis = analyze_site(&fetcher, url).await?;

    println!("\n{}", style("Suggested Configuration").bold());
    println!("{}", "-".repeat(50));
    println!("  Name:         {}", analysis.suggested_name);
    println!("  recipeLinks:  {}", analysis.selectors.recipe_links);
    println!("  title:        {}", analysis.selectors.title);
    println!("  description:  {}", analysis.selectors.description);
    println!("  ingredients:  {}", analysis.selectors.ingredients);
    println!("  instructions: {}", analysis.selectors.instructions);
    for (field, value) in [
        ("image", &analysis.selectors.image),
        ("prepTime", &analysis.selectors.prep_time),
        ("cookTime", &analysis.selectors.cook_time),
        ("difficulty", &analysis.selectors.difficulty),
        ("servings", &analysis.selectors.servings),
    ] {
        if let Some(selector) = value {
            println!("  {:<13} {}", format!("{}:", field), selector);
        }
    }

    println!("\n{}", style("Sample Preview").bold());
    println!("{}", "-".repeat(50));
    println!("  Candidate links: {}", analysis.sample.link_count);
    match (&analysis.sample.sample_url, &analysis.sample.recipe) {
        (Some(sample_url), Some(recipe)) => {
            println!("  Sample page:     {}", truncate(sample_url, 60));
            println!("  Title:           {}", recipe.title);
            println!("  Description:     {}", truncate(&recipe.description, 60));
            println!("  Ingredients:     {}", recipe.ingredients.len());
            println!("  Instructions:    {}", recipe.instructions.len());
            if let Some(image) = &recipe.image_url {
                println!("  Image:           {}", truncate(image, 60));
            }
        }
        (Some(sample_url), None) => {
            println!("  Sample page:     {}", truncate(sample_url, 60));
            println!(
                "  {} Extraction produced no complete recipe; adjust selectors before saving",
                style("!").yellow()
            );
        }
        _ => {
            println!(
                "  {} No candidate links found; the link selector needs manual attention",
                style("!").yellow()
            );
        }
    }

    if save {
        let site_repo = SiteRepository::new(&settings.database_path())?;
        if site_repo.get_by_name(&analysis.suggested_name)?.is_some() {
            println!(
                "\n{} Site '{}' already exists; not saved",
                style("✗").red(),
                analysis.suggested_name
            );
            return Ok(());
        }

        let site = SiteConfig::new(
            analysis.suggested_name.clone(),
            analysis.url.clone(),
            analysis.selectors.clone(),
        );
        site_repo.save(&site)?;
        println!(
            "\n{} Saved site '{}'",
            style("✓").green(),
            analysis.suggested_name
        );
    }

    Ok(())
}
