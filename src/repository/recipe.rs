//! Recipe repository.

use std::path::{Path, PathBuf};

use rusqlite::{params, Row};

use super::{parse_datetime, Result};
use crate::models::{Difficulty, Recipe};

/// SQLite-backed recipe repository.
pub struct RecipeRepository {
    db_path: PathBuf,
}

impl RecipeRepository {
    /// Create a new recipe repository, initializing the schema.
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
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                ingredients TEXT NOT NULL,
                instructions TEXT NOT NULL,
                source_url TEXT NOT NULL,
                source_name TEXT NOT NULL,
                image_url TEXT,
                prep_time_minutes INTEGER NOT NULL,
                cook_time_minutes INTEGER NOT NULL,
                difficulty TEXT NOT NULL,
                servings INTEGER NOT NULL,
                cookware TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_recipes_dedup
                ON recipes (title, source_name);
        "#,
        )?;
        Ok(())
    }

    fn row_to_recipe(row: &Row<'_>) -> rusqlite::Result<Recipe> {
        Ok(Recipe {
            id: row.get("id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            ingredients: serde_json::from_str(&row.get::<_, String>("ingredients")?)
                .unwrap_or_default(),
            instructions: serde_json::from_str(&row.get::<_, String>("instructions")?)
                .unwrap_or_default(),
            source_url: row.get("source_url")?,
            source_name: row.get("source_name")?,
            image_url: row.get("image_url")?,
            prep_time_minutes: row.get("prep_time_minutes")?,
            cook_time_minutes: row.get("cook_time_minutes")?,
            difficulty: Difficulty::from_str(&row.get::<_, String>("difficulty")?)
                .unwrap_or(Difficulty::Medium),
            servings: row.get("servings")?,
            cookware: row.get("cookware")?,
            created_at: parse_datetime(&row.get::<_, String>("created_at")?),
        })
    }

    /// Insert a new recipe.
    pub fn insert(&self, recipe: &Recipe) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            r#"
            INSERT INTO recipes (
                id, title, description, ingredients, instructions,
                source_url, source_name, image_url, prep_time_minutes,
                cook_time_minutes, difficulty, servings, cookware, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
            params![
                recipe.id,
                recipe.title,
                recipe.description,
                serde_json::to_string(&recipe.ingredients)?,
                serde_json::to_string(&recipe.instructions)?,
                recipe.source_url,
                recipe.source_name,
                recipe.image_url,
                recipe.prep_time_minutes,
                recipe.cook_time_minutes,
                recipe.difficulty.as_str(),
                recipe.servings,
                recipe.cookware,
                recipe.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Check whether a recipe with this dedup key already exists.
    pub fn exists(&self, title: &str, source_name: &str) -> Result<bool> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM recipes WHERE title = ? AND source_name = ?",
            params![title, source_name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Count all stored recipes.
    pub fn count(&self) -> Result<i64> {
        let conn = self.connect()?;
        let count = conn.query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Count recipes attributed to a site.
    pub fn count_by_source(&self, source_name: &str) -> Result<i64> {
        let conn = self.connect()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM recipes WHERE source_name = ?",
            params![source_name],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Get the most recently stored recipes.
    pub fn get_recent(&self, limit: u32) -> Result<Vec<Recipe>> {
        let conn = self.connect()?;
        let mut stmt =
            conn.prepare("SELECT * FROM recipes ORDER BY created_at DESC LIMIT ?")?;
        let recipes = stmt
            .query_map(params![limit], Self::row_to_recipe)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExtractedRecipe;

    fn test_repo() -> (tempfile::TempDir, RecipeRepository) {
        let dir = tempfile::tempdir().unwrap();
        let repo = RecipeRepository::new(&dir.path().join("test.db")).unwrap();
        (dir, repo)
    }

    fn test_recipe(title: &str, source: &str) -> Recipe {
        Recipe::from_extracted(
            ExtractedRecipe {
                title: title.to_string(),
                description: "Tasty.".to_string(),
                ingredients: vec!["1 egg".to_string(), "flour".to_string()],
                instructions: vec!["Mix everything together well.".to_string()],
                source_url: "https://example.com/r/1".to_string(),
                image_url: None,
                prep_time_minutes: Some(5),
                cook_time_minutes: None,
                difficulty: None,
                servings: Some(2),
            },
            source,
        )
    }

    #[test]
    fn test_insert_and_read_back() {
        let (_dir, repo) = test_repo();
        let recipe = test_recipe("Pancakes", "Alpha");
        repo.insert(&recipe).unwrap();

        let recent = repo.get_recent(10).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].title, "Pancakes");
        assert_eq!(recent[0].ingredients, recipe.ingredients);
        assert_eq!(recent[0].prep_time_minutes, 5);
        assert_eq!(recent[0].servings, 2);
    }

    #[test]
    fn test_exists_matches_on_title_and_source() {
        let (_dir, repo) = test_repo();
        repo.insert(&test_recipe("Pancakes", "Alpha")).unwrap();

        assert!(repo.exists("Pancakes", "Alpha").unwrap());
        assert!(!repo.exists("Pancakes", "Beta").unwrap());
        assert!(!repo.exists("Waffles", "Alpha").unwrap());
    }

    #[test]
    fn test_counts() {
        let (_dir, repo) = test_repo();
        repo.insert(&test_recipe("Pancakes", "Alpha")).unwrap();
        repo.insert(&test_recipe("Waffles", "Alpha")).unwrap();
        repo.insert(&test_recipe("Toast", "Beta")).unwrap();

        assert_eq!(repo.count().unwrap(), 3);
        assert_eq!(repo.count_by_source("Alpha").unwrap(), 2);
        assert_eq!(repo.count_by_source("Gamma").unwrap(), 0);
    }
}
