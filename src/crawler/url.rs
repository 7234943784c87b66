//! URL normalization.

use url::Url;

/// Resolve an href/src value against a base page URL into an absolute,
/// fetchable URL.
///
/// Handles absolute, protocol-relative, root-relative, and relative forms;
/// `data:` URIs pass through unchanged (inline images). Returns `None` when
/// the candidate is empty or either side fails to parse — callers treat a
/// rejection as "not a usable link".
pub fn normalize_url(candidate: &str, base_url: &str) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }

    if candidate.starts_with("data:") {
        return Some(candidate.to_string());
    }

    if candidate.starts_with("http://") || candidate.starts_with("https://") {
        return Some(candidate.to_string());
    }

    let base = Url::parse(base_url).ok()?;

    // Protocol-relative: inherit the base scheme
    if let Some(rest) = candidate.strip_prefix("//") {
        return checked(format!("{}://{}", base.scheme(), rest));
    }

    // Root-relative: prefix with the base origin
    if candidate.starts_with('/') {
        let host = base.host_str()?;
        return checked(match base.port() {
            Some(port) => format!("{}://{}:{}{}", base.scheme(), host, port, candidate),
            None => format!("{}://{}{}", base.scheme(), host, candidate),
        });
    }

    base.join(candidate).ok().map(|u| u.to_string())
}

/// Reject a constructed URL that does not itself parse (empty host, bad
/// characters); callers must never see an unfetchable result.
fn checked(resolved: String) -> Option<String> {
    Url::parse(&resolved).ok()?;
    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com/a/b";

    #[test]
    fn test_root_relative() {
        assert_eq!(
            normalize_url("/c", BASE),
            Some("https://example.com/c".to_string())
        );
    }

    #[test]
    fn test_root_relative_keeps_port() {
        assert_eq!(
            normalize_url("/c", "http://example.com:8080/a"),
            Some("http://example.com:8080/c".to_string())
        );
    }

    #[test]
    fn test_protocol_relative_inherits_scheme() {
        assert_eq!(
            normalize_url("//cdn.example.com/i.png", BASE),
            Some("https://cdn.example.com/i.png".to_string())
        );
        assert_eq!(
            normalize_url("//cdn.example.com/i.png", "http://example.com/"),
            Some("http://cdn.example.com/i.png".to_string())
        );
    }

    #[test]
    fn test_relative_resolves_against_base_path() {
        assert_eq!(
            normalize_url("c", BASE),
            Some("https://example.com/a/c".to_string())
        );
    }

    #[test]
    fn test_absolute_unchanged() {
        assert_eq!(
            normalize_url("https://x.com/y", BASE),
            Some("https://x.com/y".to_string())
        );
    }

    #[test]
    fn test_data_uri_unchanged() {
        let data = "data:image/png;base64,AAAA";
        assert_eq!(normalize_url(data, BASE), Some(data.to_string()));
    }

    #[test]
    fn test_empty_and_whitespace_rejected() {
        assert_eq!(normalize_url("", BASE), None);
        assert_eq!(normalize_url("   ", BASE), None);
    }

    #[test]
    fn test_bad_base_rejected() {
        assert_eq!(normalize_url("/c", "not a url"), None);
    }

    #[test]
    fn test_unparseable_resolved_result_rejected() {
        // A bare "//" would otherwise become the hostless "https://"
        assert_eq!(normalize_url("//", BASE), None);
        assert_eq!(normalize_url("//a b/c", BASE), None);
    }

    #[test]
    fn test_idempotent_for_absolute_results() {
        for candidate in ["/c", "//cdn.example.com/i.png", "c", "https://x.com/y"] {
            let once = normalize_url(candidate, BASE).unwrap();
            let twice = normalize_url(&once, BASE).unwrap();
            assert_eq!(once, twice);
        }
    }
}
