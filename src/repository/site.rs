//! Site configuration repository.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use tracing::warn;

use super::{parse_datetime, parse_datetime_opt, to_option, Result};
use crate::models::{default_sites, SelectorConfig, SiteConfig};

/// SQLite-backed site configuration repository.
pub struct SiteRepository {
    db_path: PathBuf,
}

impl SiteRepository {
    /// Create a new site repository, initializing the schema.
    pub fn new(db_path: &Path) -> Result<Self> {
        let repo = Self {
            db_path: db_path.to_path_buf(),
        };
        repo.init_schema()?;
        Ok(repo)
    }

    fn connect(&self) -> Result<rusqlite::Connection> {
        super::connect(&self.db_path)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS sites (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                url TEXT NOT NULL UNIQUE,
                selectors TEXT NOT NULL,
                enabled INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                last_crawl TEXT
            );
        "#,
        )?;
        Ok(())
    }

    fn row_to_site(row: &Row<'_>) -> rusqlite::Result<SiteConfig> {
        Ok(SiteConfig {
            id: row.get("id")?,
            name: row.get("name")?,
            url: row.get("url")?,
            selectors: serde_json::from_str::<SelectorConfig>(
                &row.get::<_, String>("selectors")?,
            )
            .unwrap_or_default(),
            enabled: row.get::<_, i64>("enabled")? != 0,
            created_at: parse_datetime(&row.get::<_, String>("created_at")?),
            last_crawl: parse_datetime_opt(row.get::<_, Option<String>>("last_crawl")?),
        })
    }

    /// Get a site by ID.
    pub fn get(&self, id: &str) -> Result<Option<SiteConfig>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT * FROM sites WHERE id = ?")?;
        to_option(stmt.query_row(params![id], Self::row_to_site))
    }

    /// Get a site by name.
    pub fn get_by_name(&self, name: &str) -> Result<Option<SiteConfig>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT * FROM sites WHERE name = ?")?;
        to_option(stmt.query_row(params![name], Self::row_to_site))
    }

    /// Get all sites.
    pub fn get_all(&self) -> Result<Vec<SiteConfig>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT * FROM sites ORDER BY name")?;
        let sites = stmt
            .query_map([], Self::row_to_site)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(sites)
    }

    /// Get enabled sites with valid selector configurations.
    ///
    /// Rows whose stored selectors fail validation are logged and filtered
    /// out here, so the orchestrator never sees a malformed config.
    pub fn get_enabled(&self) -> Result<Vec<SiteConfig>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT * FROM sites WHERE enabled = 1 ORDER BY name")?;
        let sites = stmt
            .query_map([], Self::row_to_site)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(sites
            .into_iter()
            .filter(|site| match site.selectors.validate() {
                Ok(()) => true,
                Err(e) => {
                    warn!(site = %site.name, error = %e, "skipping site with invalid selectors");
                    false
                }
            })
            .collect())
    }

    /// Save a site (insert or update). Rejects invalid selector configs.
    pub fn save(&self, site: &SiteConfig) -> Result<()> {
        site.selectors.validate()?;

        let conn = self.connect()?;
        conn.execute(
            r#"
            INSERT INTO sites (id, name, url, selectors, enabled, created_at, last_crawl)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                url = excluded.url,
                selectors = excluded.selectors,
                enabled = excluded.enabled,
                last_crawl = excluded.last_crawl
            "#,
            params![
                site.id,
                site.name,
                site.url,
                serde_json::to_string(&site.selectors)?,
                site.enabled as i64,
                site.created_at.to_rfc3339(),
                site.last_crawl.map(|dt| dt.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    /// Enable or disable a site.
    pub fn set_enabled(&self, id: &str, enabled: bool) -> Result<bool> {
        let conn = self.connect()?;
        let rows = conn.execute(
            "UPDATE sites SET enabled = ? WHERE id = ?",
            params![enabled as i64, id],
        )?;
        Ok(rows > 0)
    }

    /// Delete a site.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let conn = self.connect()?;
        let rows = conn.execute("DELETE FROM sites WHERE id = ?", params![id])?;
        Ok(rows > 0)
    }

    /// Update the last crawl timestamp after a site pass.
    pub fn update_last_crawl(&self, id: &str, timestamp: DateTime<Utc>) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "UPDATE sites SET last_crawl = ? WHERE id = ?",
            params![timestamp.to_rfc3339(), id],
        )?;
        Ok(())
    }

    /// Seed the default site list if no sites exist yet.
    /// Returns the number of sites inserted.
    pub fn seed_defaults(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM sites", [], |row| row.get(0))?;
        drop(conn);

        if count > 0 {
            return Ok(0);
        }

        let defaults = default_sites();
        for site in &defaults {
            self.save(site)?;
        }
        Ok(defaults.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SelectorConfig;

    fn test_repo() -> (tempfile::TempDir, SiteRepository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = SiteRepository::new(&dir.path().join("test.db")).unwrap();
        (dir, repo)
    }

    fn test_site(name: &str) -> SiteConfig {
        SiteConfig::new(
            name.to_string(),
            format!("https://{}.example.com/recipes", name.to_lowercase()),
            SelectorConfig {
                recipe_links: ".cards a".to_string(),
                title: "h1".to_string(),
                description: ".summary".to_string(),
                ingredients: ".ingredients li".to_string(),
                instructions: ".steps li".to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_save_and_get_round_trip() {
        let (_dir, repo) = test_repo();
        let site = test_site("Alpha");
        repo.save(&site).unwrap();

        let loaded = repo.get(&site.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Alpha");
        assert_eq!(loaded.selectors, site.selectors);
        assert!(loaded.enabled);
        assert!(loaded.last_crawl.is_none());
    }

    #[test]
    fn test_save_rejects_invalid_selectors() {
        let (_dir, repo) = test_repo();
        let mut site = test_site("Broken");
        site.selectors.title = String::new();
        assert!(repo.save(&site).is_err());
        assert!(repo.get(&site.id).unwrap().is_none());
    }

    #[test]
    fn test_get_enabled_skips_disabled() {
        let (_dir, repo) = test_repo();
        let a = test_site("Alpha");
        let mut b = test_site("Beta");
        b.enabled = false;
        repo.save(&a).unwrap();
        repo.save(&b).unwrap();

        let enabled = repo.get_enabled().unwrap();
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].name, "Alpha");
    }

    #[test]
    fn test_update_last_crawl() {
        let (_dir, repo) = test_repo();
        let site = test_site("Alpha");
        repo.save(&site).unwrap();

        let now = Utc::now();
        repo.update_last_crawl(&site.id, now).unwrap();

        let loaded = repo.get(&site.id).unwrap().unwrap();
        let stored = loaded.last_crawl.unwrap();
        assert!((stored - now).num_seconds().abs() < 2);
    }

    #[test]
    fn test_seed_defaults_only_when_empty() {
        let (_dir, repo) = test_repo();
        let seeded = repo.seed_defaults().unwrap();
        assert!(seeded > 0);
        assert_eq!(repo.seed_defaults().unwrap(), 0);
        assert_eq!(repo.get_all().unwrap().len(), seeded);
    }
}
