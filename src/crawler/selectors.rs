//! Selector engine: per-field extraction with documented fallbacks.
//!
//! The pattern tables below are the single source of truth for "common
//! selector" heuristics. Both crawl-time extraction fallbacks and the site
//! analyzer consume them, so the two can never drift apart.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::url::normalize_url;
use crate::models::Difficulty;

/// Ingredients shorter than this (after trimming) are noise.
const MIN_INGREDIENT_LEN: usize = 2;
/// Instructions shorter than this (after trimming) are noise.
const MIN_INSTRUCTION_LEN: usize = 6;

/// Common patterns for recipe-card links on a listing page.
pub const LINK_PATTERNS: &[&str] = &[
    ".recipe-card a",
    ".recipe a",
    "a.recipe-link",
    "article a",
    ".post a",
    ".entry-title a",
    "a[href*='recipe']",
];

/// Common patterns for the recipe title on a detail page.
pub const TITLE_PATTERNS: &[&str] = &[
    "h1.recipe-title",
    ".recipe-title",
    "[itemprop='name']",
    "h1.entry-title",
    "h1",
];

/// Common patterns for the recipe description.
pub const DESCRIPTION_PATTERNS: &[&str] = &[
    ".recipe-summary",
    ".recipe-description",
    "[itemprop='description']",
    ".entry-summary",
    ".description",
];

/// Common patterns for ingredient list items.
pub const INGREDIENT_PATTERNS: &[&str] = &[
    ".recipe-ingredients li",
    ".ingredients li",
    "[itemprop='recipeIngredient']",
    ".ingredient",
    "ul.ingredients li",
];

/// Common patterns for instruction list items.
pub const INSTRUCTION_PATTERNS: &[&str] = &[
    ".recipe-instructions li",
    ".instructions li",
    "[itemprop='recipeInstructions'] li",
    ".direction",
    ".instruction",
    "ol li",
];

/// Common patterns for the lead image, in priority order. Social-preview
/// meta tags come first since they are usually the curated image.
pub const IMAGE_PATTERNS: &[&str] = &[
    "meta[property='og:image']",
    "meta[name='twitter:image']",
    "[itemprop='image']",
    ".recipe-image img",
    ".post-thumbnail img",
    "article img",
];

/// Common patterns for prep time.
pub const PREP_TIME_PATTERNS: &[&str] =
    &["[itemprop='prepTime']", ".prep-time", ".recipe-prep-time"];

/// Common patterns for cook time.
pub const COOK_TIME_PATTERNS: &[&str] =
    &["[itemprop='cookTime']", ".cook-time", ".recipe-cook-time"];

/// Common patterns for difficulty.
pub const DIFFICULTY_PATTERNS: &[&str] = &[".difficulty", ".recipe-difficulty", ".skill-level"];

/// Common patterns for servings.
pub const SERVINGS_PATTERNS: &[&str] =
    &["[itemprop='recipeYield']", ".servings", ".recipe-servings", ".yield"];

static HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:hours?|hrs?|h)\b").unwrap());
static MINUTES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:minutes?|mins?|m)\b").unwrap());
static INTEGER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static STEP_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:step\s*\d*|\d+)[.:)]?$").unwrap());

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(s) => Some(s),
        Err(_) => {
            debug!(selector, "ignoring unparseable selector");
            None
        }
    }
}

/// Collect an element's text with collapsed whitespace.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First non-empty text among elements matched by `selector`.
/// Comma-separated alternatives in the selector act as "any of".
pub fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = parse_selector(selector)?;
    document
        .select(&selector)
        .map(element_text)
        .find(|text| !text.is_empty())
}

/// Extract the title: configured selector first, then the page's first h1.
pub fn extract_title(document: &Html, selector: &str) -> Option<String> {
    first_text(document, selector).or_else(|| first_text(document, "h1"))
}

/// Extract the description: configured selector first, then the
/// meta-description content attribute.
pub fn extract_description(document: &Html, selector: &str) -> Option<String> {
    first_text(document, selector).or_else(|| {
        let meta = parse_selector("meta[name='description']")?;
        document
            .select(&meta)
            .filter_map(|el| el.value().attr("content"))
            .map(|content| content.trim().to_string())
            .find(|content| !content.is_empty())
    })
}

/// Extract every matched ingredient, trimmed, noise-filtered, and
/// deduplicated in insertion order.
pub fn extract_ingredients(document: &Html, selector: &str) -> Vec<String> {
    let Some(selector) = parse_selector(selector) else {
        return Vec::new();
    };

    let mut seen = std::collections::HashSet::new();
    let mut ingredients = Vec::new();
    for element in document.select(&selector) {
        let text = element_text(element);
        if text.len() >= MIN_INGREDIENT_LEN && seen.insert(text.clone()) {
            ingredients.push(text);
        }
    }
    ingredients
}

/// Extract every matched instruction, trimmed and noise-filtered.
///
/// Bare step markers ("1.", "Step 2") are discarded. Instructions are NOT
/// deduplicated: repeated steps are legitimate.
pub fn extract_instructions(document: &Html, selector: &str) -> Vec<String> {
    let Some(selector) = parse_selector(selector) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(element_text)
        .filter(|text| text.len() >= MIN_INSTRUCTION_LEN && !STEP_MARKER_RE.is_match(text))
        .collect()
}

/// Extract the lead image URL, normalized against the page URL.
///
/// Tries the configured selector first (when present), then the shared
/// image pattern list, reading `content` for meta tags and `src` otherwise.
pub fn extract_image(document: &Html, selector: Option<&str>, page_url: &str) -> Option<String> {
    let candidates = selector
        .into_iter()
        .chain(IMAGE_PATTERNS.iter().copied());

    for candidate in candidates {
        let Some(parsed) = parse_selector(candidate) else {
            continue;
        };
        for element in document.select(&parsed) {
            let raw = element
                .value()
                .attr("content")
                .or_else(|| element.value().attr("src"));
            if let Some(normalized) = raw.and_then(|raw| normalize_url(raw, page_url)) {
                return Some(normalized);
            }
        }
    }
    None
}

/// Parse free-form duration text into total minutes.
///
/// Sums `<N> hour|hr|h` and `<N> minute|min|m` tokens; a bare integer with
/// no unit counts as minutes. Unparsable text, or a total that overflows
/// the minute counter, is undetected (`None`).
pub fn parse_minutes(text: &str) -> Option<u32> {
    let hours = HOURS_RE
        .captures(text)
        .and_then(|c| c[1].parse::<u32>().ok());
    let minutes = MINUTES_RE
        .captures(text)
        .and_then(|c| c[1].parse::<u32>().ok());

    match (hours, minutes) {
        (None, None) => INTEGER_RE
            .find(text)
            .and_then(|m| m.as_str().parse::<u32>().ok()),
        (h, m) => h
            .unwrap_or(0)
            .checked_mul(60)
            .and_then(|total| total.checked_add(m.unwrap_or(0))),
    }
}

/// Extract a duration field as total minutes.
pub fn extract_minutes(document: &Html, selector: Option<&str>) -> Option<u32> {
    let text = first_text(document, selector?)?;
    parse_minutes(&text)
}

/// Parse the first positive integer token as a servings count.
pub fn parse_servings(text: &str) -> Option<u32> {
    INTEGER_RE
        .find(text)?
        .as_str()
        .parse::<u32>()
        .ok()
        .filter(|&n| n > 0)
}

/// Extract the servings field.
pub fn extract_servings(document: &Html, selector: Option<&str>) -> Option<u32> {
    let text = first_text(document, selector?)?;
    parse_servings(&text)
}

/// Extract and classify the difficulty field. Undetected stays `None`;
/// insert-time defaulting maps that to medium.
pub fn extract_difficulty(document: &Html, selector: Option<&str>) -> Option<Difficulty> {
    let text = first_text(document, selector?)?;
    Some(Difficulty::classify(&text))
}
