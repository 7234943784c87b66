//! Bootstrap command.

use console::style;

use crate::config::Settings;
use crate::repository::{RecipeRepository, SiteRepository};

/// Create the data directory and database schema, seeding a small default
/// site list if none exist.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    std::fs::create_dir_all(&settings.data_dir)?;

    let db_path = settings.database_path();
    let site_repo = SiteRepository::new(&db_path)?;
    RecipeRepository::new(&db_path)?;

    let seeded = site_repo.seed_defaults()?;

    println!(
        "{} Initialized {}",
        style("✓").green(),
        db_path.display()
    );
    if seeded > 0 {
        println!("{} Seeded {} default sites", style("✓").green(), seeded);
    } else {
        println!("  Existing sites kept; nothing seeded");
    }

    Ok(())
}
