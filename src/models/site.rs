//! Site configuration models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-field CSS selectors for one site.
///
/// Each value is a selector expression, possibly containing comma-separated
/// alternatives handled by the query engine as "any of". Field names follow
/// the stored JSON shape (camelCase).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorConfig {
    /// Anchors on the listing page pointing at recipe detail pages.
    pub recipe_links: String,
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,
}

/// Validation failure for a stored selector configuration.
#[derive(Debug, thiserror::Error)]
pub enum SelectorConfigError {
    #[error("required selector '{0}' is empty")]
    MissingRequired(&'static str),
    #[error("selector '{field}' does not parse: {selector}")]
    Unparseable { field: &'static str, selector: String },
}

impl SelectorConfig {
    /// Validate at the storage boundary: required selectors must be
    /// non-empty and every present selector must parse. Malformed configs
    /// are rejected before they reach the crawl orchestrator.
    pub fn validate(&self) -> Result<(), SelectorConfigError> {
        let required: [(&'static str, &str); 5] = [
            ("recipeLinks", &self.recipe_links),
            ("title", &self.title),
            ("description", &self.description),
            ("ingredients", &self.ingredients),
            ("instructions", &self.instructions),
        ];

        for (field, selector) in required {
            if selector.trim().is_empty() {
                return Err(SelectorConfigError::MissingRequired(field));
            }
            check_parses(field, selector)?;
        }

        let optional: [(&'static str, &Option<String>); 5] = [
            ("image", &self.image),
            ("prepTime", &self.prep_time),
            ("cookTime", &self.cook_time),
            ("difficulty", &self.difficulty),
            ("servings", &self.servings),
        ];

        for (field, selector) in optional {
            if let Some(s) = selector {
                if !s.trim().is_empty() {
                    check_parses(field, s)?;
                }
            }
        }

        Ok(())
    }
}

fn check_parses(field: &'static str, selector: &str) -> Result<(), SelectorConfigError> {
    scraper::Selector::parse(selector).map_err(|_| SelectorConfigError::Unparseable {
        field,
        selector: selector.to_string(),
    })?;
    Ok(())
}

/// A configured crawl target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Unique identifier for this site.
    pub id: String,
    /// Unique human-readable name; recipes are attributed to it.
    pub name: String,
    /// Listing page URL.
    pub url: String,
    /// Field selectors for this site.
    pub selectors: SelectorConfig,
    /// Disabled sites are skipped entirely by the orchestrator.
    pub enabled: bool,
    /// When the site was added.
    pub created_at: DateTime<Utc>,
    /// When a crawl pass over this site last completed (even partially).
    pub last_crawl: Option<DateTime<Utc>>,
}

impl SiteConfig {
    /// Create a new enabled site configuration.
    pub fn new(name: String, url: String, selectors: SelectorConfig) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            url,
            selectors,
            enabled: true,
            created_at: Utc::now(),
            last_crawl: None,
        }
    }
}

/// Default site configurations seeded by `harvest init` when none exist.
pub fn default_sites() -> Vec<SiteConfig> {
    vec![
        SiteConfig::new(
            "Budget Bytes".to_string(),
            "https://www.budgetbytes.com/category/recipes/".to_string(),
            SelectorConfig {
                recipe_links: ".archive-post-listing a, article.post-summary a".to_string(),
                title: "h1.entry-title, h1".to_string(),
                description: ".wprm-recipe-summary, .entry-content p".to_string(),
                ingredients: ".wprm-recipe-ingredient".to_string(),
                instructions: ".wprm-recipe-instruction-text".to_string(),
                image: Some(".wprm-recipe-image img".to_string()),
                prep_time: Some(".wprm-recipe-prep_time".to_string()),
                cook_time: Some(".wprm-recipe-cook_time".to_string()),
                difficulty: None,
                servings: Some(".wprm-recipe-servings".to_string()),
            },
        ),
        SiteConfig::new(
            "Minimalist Baker".to_string(),
            "https://minimalistbaker.com/recipe-index/".to_string(),
            SelectorConfig {
                recipe_links: ".post-summary a, .archives a".to_string(),
                title: "h1.entry-title, h1".to_string(),
                description: ".wprm-recipe-summary".to_string(),
                ingredients: ".wprm-recipe-ingredient".to_string(),
                instructions: ".wprm-recipe-instruction-text".to_string(),
                image: Some(".wprm-recipe-image img".to_string()),
                prep_time: Some(".wprm-recipe-prep_time".to_string()),
                cook_time: Some(".wprm-recipe-cook_time".to_string()),
                difficulty: None,
                servings: Some(".wprm-recipe-servings".to_string()),
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_selectors() -> SelectorConfig {
        SelectorConfig {
            recipe_links: ".cards a".to_string(),
            title: "h1".to_string(),
            description: ".summary".to_string(),
            ingredients: ".ingredients li".to_string(),
            instructions: ".steps li".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_selector_config_json_shape() {
        let json = r#"{
            "recipeLinks": ".cards a",
            "title": "h1",
            "description": ".summary",
            "ingredients": ".ingredients li",
            "instructions": ".steps li",
            "prepTime": ".prep"
        }"#;

        let config: SelectorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.recipe_links, ".cards a");
        assert_eq!(config.prep_time, Some(".prep".to_string()));
        assert!(config.image.is_none());

        // camelCase survives the round trip
        let back = serde_json::to_string(&config).unwrap();
        assert!(back.contains("recipeLinks"));
        assert!(back.contains("prepTime"));
        assert!(!back.contains("recipe_links"));
    }

    #[test]
    fn test_validate_accepts_minimal_config() {
        assert!(minimal_selectors().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_required() {
        let mut config = minimal_selectors();
        config.ingredients = "  ".to_string();
        match config.validate() {
            Err(SelectorConfigError::MissingRequired(field)) => {
                assert_eq!(field, "ingredients");
            }
            other => panic!("expected MissingRequired, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_unparseable_selector() {
        let mut config = minimal_selectors();
        config.title = "h1[".to_string();
        assert!(matches!(
            config.validate(),
            Err(SelectorConfigError::Unparseable { field: "title", .. })
        ));
    }

    #[test]
    fn test_default_sites_are_valid() {
        for site in default_sites() {
            assert!(site.enabled);
            assert!(site.last_crawl.is_none());
            site.selectors.validate().unwrap();
        }
    }
}
