//! Data models for RecipeHarvest.

mod recipe;
mod site;

pub use recipe::{
    Difficulty, ExtractedRecipe, Recipe, DEFAULT_COOKWARE, DEFAULT_COOK_MINUTES,
    DEFAULT_PREP_MINUTES, DEFAULT_SERVINGS,
};
pub use site::{default_sites, SelectorConfig, SelectorConfigError, SiteConfig};
