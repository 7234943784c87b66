//! Recipe models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default servings when a site's selectors do not detect a count.
pub const DEFAULT_SERVINGS: u32 = 4;
/// Default prep time in minutes when undetected.
pub const DEFAULT_PREP_MINUTES: u32 = 15;
/// Default cook time in minutes when undetected.
pub const DEFAULT_COOK_MINUTES: u32 = 30;
/// Cookware has no detector; every stored recipe gets this value.
pub const DEFAULT_COOKWARE: &str = "skillet";

/// Recipe difficulty level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    /// Classify free-form difficulty text by substring.
    ///
    /// Anything detected but unrecognized counts as medium; callers default
    /// undetected text to medium at insert time.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("easy") || lower.contains("beginner") {
            Self::Easy
        } else if lower.contains("hard") || lower.contains("advanced") {
            Self::Hard
        } else {
            Self::Medium
        }
    }
}

/// The result of successfully extracting one recipe detail page.
///
/// Never constructed partially: extraction either yields a record with a
/// non-empty title, description, ingredient list, and instruction list, or
/// yields nothing. Optional fields stay `None` when undetected so callers
/// can distinguish "detected" from "defaulted".
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRecipe {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    /// Absolute URL the recipe was extracted from.
    pub source_url: String,
    pub image_url: Option<String>,
    pub prep_time_minutes: Option<u32>,
    pub cook_time_minutes: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub servings: Option<u32>,
}

/// A stored recipe.
///
/// Uniqueness on `(title, source_name)` is enforced by the orchestrator's
/// dedup check before insert, not by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub source_url: String,
    /// Name of the owning site configuration.
    pub source_name: String,
    pub image_url: Option<String>,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    pub difficulty: Difficulty,
    pub servings: u32,
    pub cookware: String,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Build a storable recipe from an extraction result, applying
    /// insert-time defaults for any undetected optional field.
    pub fn from_extracted(extracted: ExtractedRecipe, source_name: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: extracted.title,
            description: extracted.description,
            ingredients: extracted.ingredients,
            instructions: extracted.instructions,
            source_url: extracted.source_url,
            source_name: source_name.to_string(),
            image_url: extracted.image_url,
            prep_time_minutes: extracted.prep_time_minutes.unwrap_or(DEFAULT_PREP_MINUTES),
            cook_time_minutes: extracted.cook_time_minutes.unwrap_or(DEFAULT_COOK_MINUTES),
            difficulty: extracted.difficulty.unwrap_or(Difficulty::Medium),
            servings: extracted.servings.unwrap_or(DEFAULT_SERVINGS),
            cookware: DEFAULT_COOKWARE.to_string(),
            created_at: Utc::now(),
        }
    }
}
