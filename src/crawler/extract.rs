//! Recipe extraction from a single detail page.

use scraper::Html;
use tracing::{info, warn};

use super::fetch::PageFetcher;
use super::selectors;
use crate::models::{ExtractedRecipe, SelectorConfig};

/// Fetch a detail page and extract a recipe from it.
///
/// A terminal fetch failure or an incomplete page yields `None`; the caller
/// skips the link. Partial records are never returned.
pub async fn extract_recipe(
    fetcher: &dyn PageFetcher,
    url: &str,
    selectors: &SelectorConfig,
) -> Option<ExtractedRecipe> {
    let html = match fetcher.fetch_page(url).await {
        Ok(html) => html,
        Err(e) => {
            warn!(url, error = %e, "detail fetch failed");
            return None;
        }
    };

    extract_from_html(&html, url, selectors)
}

/// Extract a recipe from already-fetched HTML.
///
/// Validation gate: title, description, at least one ingredient, and at
/// least one instruction are all required. Optional fields are reported as
/// absent when undetected; defaulting happens at insert time.
pub fn extract_from_html(
    html: &str,
    url: &str,
    selectors: &SelectorConfig,
) -> Option<ExtractedRecipe> {
    let document = Html::parse_document(html);

    let title = selectors::extract_title(&document, &selectors.title);
    let description = selectors::extract_description(&document, &selectors.description);
    let ingredients = selectors::extract_ingredients(&document, &selectors.ingredients);
    let instructions = selectors::extract_instructions(&document, &selectors.instructions);

    let mut missing = Vec::new();
    if title.is_none() {
        missing.push("title");
    }
    if description.is_none() {
        missing.push("description");
    }
    if ingredients.is_empty() {
        missing.push("ingredients");
    }
    if instructions.is_empty() {
        missing.push("instructions");
    }
    if !missing.is_empty() {
        info!(url, missing = ?missing, "rejecting page with incomplete recipe data");
        return None;
    }

    Some(ExtractedRecipe {
        title: title?,
        description: description?,
        ingredients,
        instructions,
        source_url: url.to_string(),
        image_url: selectors::extract_image(&document, selectors.image.as_deref(), url),
        prep_time_minutes: selectors::extract_minutes(&document, selectors.prep_time.as_deref()),
        cook_time_minutes: selectors::extract_minutes(&document, selectors.cook_time.as_deref()),
        difficulty: selectors::extract_difficulty(&document, selectors.difficulty.as_deref()),
        servings: selectors::extract_servings(&document, selectors.servings.as_deref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;

    fn test_selectors() -> SelectorConfig {
        SelectorConfig {
            recipe_links: ".cards a".to_string(),
            title: ".recipe-title".to_string(),
            description: ".summary".to_string(),
            ingredients: ".ingredients li".to_string(),
            instructions: ".steps li".to_string(),
            image: None,
            prep_time: Some(".prep".to_string()),
            cook_time: Some(".cook".to_string()),
            difficulty: Some(".difficulty".to_string()),
            servings: Some(".servings".to_string()),
        }
    }

    fn full_page() -> String {
        r#"<html><head></head><body>
            <h1 class="recipe-title">Banana Skillet</h1>
            <p class="summary">A quick caramelized dessert.</p>
            <span class="prep">10 min</span>
            <span class="cook">1 hour 30 minutes</span>
            <span class="difficulty">Beginner friendly</span>
            <span class="servings">Serves 2</span>
            <ul class="ingredients"><li>2 bananas</li><li>1 tbsp butter</li></ul>
            <ol class="steps"><li>Melt the butter in a skillet.</li>
            <li>Cook the bananas until golden.</li></ol>
        </body></html>"#
            .to_string()
    }

    #[test]
    fn test_full_page_extracts_everything() {
        let recipe =
            extract_from_html(&full_page(), "https://x.com/r/banana", &test_selectors()).unwrap();
        assert_eq!(recipe.title, "Banana Skillet");
        assert_eq!(recipe.description, "A quick caramelized dessert.");
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.instructions.len(), 2);
        assert_eq!(recipe.source_url, "https://x.com/r/banana");
        assert_eq!(recipe.prep_time_minutes, Some(10));
        assert_eq!(recipe.cook_time_minutes, Some(90));
        assert_eq!(recipe.difficulty, Some(Difficulty::Easy));
        assert_eq!(recipe.servings, Some(2));
    }

    #[test]
    fn test_completeness_gate_rejects_missing_required_fields() {
        let selectors = test_selectors();
        let cases = [
            ("<p class='summary'>d</p><ul class='ingredients'><li>egg</li></ul>\
              <ol class='steps'><li>Beat the egg well.</li></ol>",
             "no title anywhere"),
            ("<h1 class='recipe-title'>T</h1>\
              <ul class='ingredients'><li>egg</li></ul>\
              <ol class='steps'><li>Beat the egg well.</li></ol>",
             "no description"),
            ("<h1 class='recipe-title'>T</h1><p class='summary'>d</p>\
              <ol class='steps'><li>Beat the egg well.</li></ol>",
             "no ingredients"),
            ("<h1 class='recipe-title'>T</h1><p class='summary'>d</p>\
              <ul class='ingredients'><li>egg</li></ul>",
             "no instructions"),
        ];

        for (body, label) in cases {
            let html = format!("<html><head></head><body>{}</body></html>", body);
            assert!(
                extract_from_html(&html, "https://x.com/r/1", &selectors).is_none(),
                "expected rejection: {}",
                label
            );
        }
    }

    #[test]
    fn test_undetected_optionals_stay_absent() {
        let html = "<html><body>\
            <h1 class='recipe-title'>T</h1><p class='summary'>d</p>\
            <ul class='ingredients'><li>egg</li></ul>\
            <ol class='steps'><li>Beat the egg well.</li></ol>\
            </body></html>";
        let recipe = extract_from_html(html, "https://x.com/r/1", &test_selectors()).unwrap();
        assert_eq!(recipe.prep_time_minutes, None);
        assert_eq!(recipe.cook_time_minutes, None);
        assert_eq!(recipe.difficulty, None);
        assert_eq!(recipe.servings, None);
        assert_eq!(recipe.image_url, None);
    }
}
