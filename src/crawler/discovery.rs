//! Candidate link discovery on listing pages.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use tracing::debug;

use super::url::normalize_url;

/// Keywords that mark a URL as recipe-like.
const RECIPE_KEYWORDS: &[&str] = &["recipe", "recipes", "cooking", "food"];

/// Dated or ID'd permalinks carry a 2- or 4-digit numeric token.
static NUMERIC_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:\d{2}|\d{4})\b").unwrap());

/// Recipe-likelihood filter.
///
/// Link selectors are necessarily coarse (often "all anchors in a card
/// grid"); this filter is the precision backstop. A URL passes when it
/// contains a recipe keyword (case-insensitive) or a 2/4-digit numeric
/// token.
pub fn likely_recipe_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    RECIPE_KEYWORDS.iter().any(|kw| lower.contains(kw)) || NUMERIC_TOKEN_RE.is_match(&lower)
}

/// Discover candidate recipe-detail links on a listing page.
///
/// Queries the link selector, normalizes each href against the listing
/// URL, drops normalization rejections and unlikely URLs, and dedups by
/// exact normalized URL in insertion order.
pub fn discover_links(document: &Html, link_selector: &str, base_url: &str) -> Vec<String> {
    let Ok(selector) = scraper::Selector::parse(link_selector) else {
        debug!(selector = link_selector, "unparseable link selector");
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(url) = normalize_url(href, base_url) else {
            continue;
        };
        if !likely_recipe_url(&url) {
            debug!(url, "discarding unlikely link");
            continue;
        }
        if seen.insert(url.clone()) {
            links.push(url);
        }
    }

    links
}

/// Count elements matched by a pattern. Used by the analyzer's
/// link-count maximization heuristic.
pub fn count_matches(document: &Html, pattern: &str) -> usize {
    match scraper::Selector::parse(pattern) {
        Ok(selector) => document.select(&selector).count(),
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_likelihood_filter() {
        assert!(likely_recipe_url(
            "https://site.com/blog/2024-banana-skillet-recipe"
        ));
        assert!(likely_recipe_url("https://site.com/RECIPES/pasta"));
        assert!(likely_recipe_url("https://site.com/posts/42-stew"));
        assert!(!likely_recipe_url("https://site.com/about"));
        assert!(!likely_recipe_url("https://site.com/p/123"));
    }

    #[test]
    fn test_discover_normalizes_filters_and_dedups() {
        let html = r#"
            <div class="cards">
                <a href="/recipes/pancakes">Pancakes</a>
                <a href="/recipes/pancakes">Pancakes again</a>
                <a href="//cdn.site.com/recipes/waffles">Waffles</a>
                <a href="/about">About us</a>
                <a href="   ">blank</a>
                <a>no href</a>
            </div>
        "#;
        let document = Html::parse_document(html);
        let links = discover_links(&document, ".cards a", "https://site.com/index");

        assert_eq!(
            links,
            vec![
                "https://site.com/recipes/pancakes".to_string(),
                "https://cdn.site.com/recipes/waffles".to_string(),
            ]
        );
    }

    #[test]
    fn test_discover_with_bad_selector_is_empty() {
        let document = Html::parse_document("<a href='/recipes/x'>x</a>");
        assert!(discover_links(&document, "a[", "https://site.com/").is_empty());
    }

    #[test]
    fn test_count_matches() {
        let document =
            Html::parse_document("<article><a href='1'></a><a href='2'></a></article><p></p>");
        assert_eq!(count_matches(&document, "article a"), 2);
        assert_eq!(count_matches(&document, ".none"), 0);
        assert_eq!(count_matches(&document, "p["), 0);
    }
}
