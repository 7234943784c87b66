//! Selector auto-suggestion for unconfigured sites.
//!
//! Runs the shared pattern battery against a page to propose a working
//! selector configuration, then exercises discovery and extraction against
//! the best guesses to build a sample preview for the operator. The sample
//! is advisory only and never persisted.

use scraper::Html;
use url::Url;

use super::discovery::{count_matches, discover_links};
use super::extract::extract_recipe;
use super::fetch::{FetchError, PageFetcher};
use super::selectors::{
    first_text, COOK_TIME_PATTERNS, DESCRIPTION_PATTERNS, DIFFICULTY_PATTERNS, IMAGE_PATTERNS,
    INGREDIENT_PATTERNS, INSTRUCTION_PATTERNS, LINK_PATTERNS, PREP_TIME_PATTERNS,
    SERVINGS_PATTERNS, TITLE_PATTERNS,
};
use crate::models::{ExtractedRecipe, SelectorConfig};

/// Analysis failure. Unlike crawl-time fetches, the page under analysis is
/// the whole point, so its fetch failure is terminal.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Suggested configuration plus a one-item sample preview.
#[derive(Debug)]
pub struct SiteAnalysis {
    /// Human-readable name derived from the hostname.
    pub suggested_name: String,
    /// The analyzed listing URL.
    pub url: String,
    /// Best-guess selectors from the shared pattern tables.
    pub selectors: SelectorConfig,
    pub sample: SamplePreview,
}

/// What the suggested configuration found on a first pass.
#[derive(Debug)]
pub struct SamplePreview {
    /// Candidate links discovered with the suggested link selector.
    pub link_count: usize,
    /// The first discovered link, if any.
    pub sample_url: Option<String>,
    /// Extraction result for the first link, if it produced a full recipe.
    pub recipe: Option<ExtractedRecipe>,
}

/// Analyze a listing page and suggest a selector configuration.
pub async fn analyze_site(
    fetcher: &dyn PageFetcher,
    url: &str,
) -> Result<SiteAnalysis, AnalyzeError> {
    let html = fetcher.fetch_page(url).await?;

    let (selectors, links) = {
        let document = Html::parse_document(&html);
        let selectors = suggest_selectors(&document);
        let links = discover_links(&document, &selectors.recipe_links, url);
        (selectors, links)
    };

    let sample_url = links.first().cloned();
    let recipe = match &sample_url {
        Some(link) => extract_recipe(fetcher, link, &selectors).await,
        None => None,
    };

    Ok(SiteAnalysis {
        suggested_name: suggest_site_name(url),
        url: url.to_string(),
        selectors,
        sample: SamplePreview {
            link_count: links.len(),
            sample_url,
            recipe,
        },
    })
}

/// Pick selectors from the shared pattern tables.
///
/// `recipeLinks` uses link-count maximization: the pattern matching the
/// most anchors most plausibly represents the recipe-card list. Every other
/// field uses first-match-with-content.
pub fn suggest_selectors(document: &Html) -> SelectorConfig {
    SelectorConfig {
        recipe_links: best_link_pattern(document).to_string(),
        title: first_with_content(document, TITLE_PATTERNS).to_string(),
        description: first_with_content(document, DESCRIPTION_PATTERNS).to_string(),
        ingredients: first_with_content(document, INGREDIENT_PATTERNS).to_string(),
        instructions: first_with_content(document, INSTRUCTION_PATTERNS).to_string(),
        image: first_with_attr(document, IMAGE_PATTERNS).map(str::to_string),
        prep_time: detected_only(document, PREP_TIME_PATTERNS).map(str::to_string),
        cook_time: detected_only(document, COOK_TIME_PATTERNS).map(str::to_string),
        difficulty: detected_only(document, DIFFICULTY_PATTERNS).map(str::to_string),
        servings: detected_only(document, SERVINGS_PATTERNS).map(str::to_string),
    }
}

/// The link pattern matching the most elements; ties go to the earlier
/// pattern, and a page matching nothing falls back to the first pattern.
fn best_link_pattern(document: &Html) -> &'static str {
    let mut best = LINK_PATTERNS[0];
    let mut best_count = 0usize;
    for pattern in LINK_PATTERNS.iter().copied() {
        let count = count_matches(document, pattern);
        if count > best_count {
            best = pattern;
            best_count = count;
        }
    }
    best
}

/// First pattern whose query yields an element with non-empty text; falls
/// back to the table's last (most generic) entry so required selectors are
/// always populated.
fn first_with_content(document: &Html, patterns: &'static [&'static str]) -> &'static str {
    patterns
        .iter()
        .find(|pattern| first_text(document, pattern).is_some())
        .copied()
        .unwrap_or_else(|| patterns[patterns.len() - 1])
}

/// First pattern yielding a usable src/content attribute.
fn first_with_attr(document: &Html, patterns: &'static [&'static str]) -> Option<&'static str> {
    patterns.iter().copied().find(|pattern| {
        let Ok(selector) = scraper::Selector::parse(pattern) else {
            return false;
        };
        document.select(&selector).any(|el| {
            el.value()
                .attr("content")
                .or_else(|| el.value().attr("src"))
                .is_some_and(|v| !v.trim().is_empty())
        })
    })
}

/// Like `first_with_content` but with no fallback: optional fields are only
/// suggested when actually detected.
fn detected_only(document: &Html, patterns: &'static [&'static str]) -> Option<&'static str> {
    patterns
        .iter()
        .find(|pattern| first_text(document, pattern).is_some())
        .copied()
}

/// Generic second-level labels under country-code TLDs ("co.uk",
/// "com.au"); stripped along with the TLD when deriving a name.
const GENERIC_SECOND_LEVELS: &[&str] = &["co", "com", "org", "net", "ac", "gov", "edu"];

/// Derive a human-readable site name from a URL's hostname: strip `www.`,
/// strip the TLD (and a generic second-level label under it), split on
/// hyphens, title-case each segment.
pub fn suggest_site_name(url: &str) -> String {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string());

    let host = host.strip_prefix("www.").unwrap_or(&host);

    let without_tld = match host.rsplit_once('.') {
        Some((name, _tld)) if !name.is_empty() => name,
        _ => host,
    };

    let without_tld = match without_tld.rsplit_once('.') {
        Some((name, sld)) if !name.is_empty() && GENERIC_SECOND_LEVELS.contains(&sld) => name,
        _ => without_tld,
    };

    without_tld
        .split('-')
        .filter(|segment| !segment.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_site_name() {
        assert_eq!(
            suggest_site_name("https://www.tasty-kitchen-blog.com/recipes"),
            "Tasty Kitchen Blog"
        );
        assert_eq!(suggest_site_name("https://budgetbytes.com/"), "Budgetbytes");
        assert_eq!(suggest_site_name("https://www.food.co/x"), "Food");
    }

    #[test]
    fn test_suggest_site_name_strips_multi_part_tlds() {
        assert_eq!(
            suggest_site_name("https://www.budgetbytes.co.uk/recipes"),
            "Budgetbytes"
        );
        assert_eq!(
            suggest_site_name("https://great-bakes.com.au/"),
            "Great Bakes"
        );
    }

    #[test]
    fn test_best_link_pattern_maximizes_matches() {
        // 12 anchors under .recipe-card vs 3 under article: the card
        // pattern must win even though article appears later.
        let mut cards = String::new();
        for i in 0..12 {
            cards.push_str(&format!(
                "<div class='recipe-card'><a href='/recipes/{}'>r</a></div>",
                i
            ));
        }
        let html = format!(
            "<html><body>{}<article><a href='/a'>1</a><a href='/b'>2</a>\
             <a href='/c'>3</a></article></body></html>",
            cards
        );
        let document = Html::parse_document(&html);
        assert_eq!(best_link_pattern(&document), ".recipe-card a");
    }

    #[test]
    fn test_best_link_pattern_falls_back_when_nothing_matches() {
        let document = Html::parse_document("<html><body><p>empty</p></body></html>");
        assert_eq!(best_link_pattern(&document), LINK_PATTERNS[0]);
    }

    #[test]
    fn test_suggest_selectors_prefers_detected_patterns() {
        let html = "<html><body>\
            <h1 class='recipe-title'>T</h1>\
            <div class='recipe-description'>Tasty.</div>\
            <ul class='ingredients'><li>egg</li></ul>\
            <ol><li>Beat the egg well.</li></ol>\
            <span class='servings'>4</span>\
            </body></html>";
        let document = Html::parse_document(html);
        let selectors = suggest_selectors(&document);

        assert_eq!(selectors.title, "h1.recipe-title");
        assert_eq!(selectors.description, ".recipe-description");
        assert_eq!(selectors.ingredients, ".ingredients li");
        assert_eq!(selectors.instructions, "ol li");
        assert_eq!(selectors.servings, Some(".servings".to_string()));
        // Undetected optional fields stay unsuggested
        assert_eq!(selectors.prep_time, None);
        assert_eq!(selectors.difficulty, None);
        // Required fields are always populated and valid
        selectors.validate().unwrap();
    }
}
