//! Helpers for joining the tutor API base with endpoint paths.

/// Strip trailing slashes so endpoint joins never produce `//`.
///
/// ```
/// use parlance::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:5000/api/"), "http://localhost:5000/api");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Join `endpoint` onto the normalized base.
///
/// ```
/// use parlance::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:5000/api/", "/session/new"),
///     "http://localhost:5000/api/session/new"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{normalized_base}/{endpoint}")
}

/// Returns true when `url` looks usable as an API base.
pub fn is_http_url(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_slashes_and_whitespace() {
        assert_eq!(
            normalize_base_url("http://localhost:5000/api"),
            "http://localhost:5000/api"
        );
        assert_eq!(
            normalize_base_url("http://localhost:5000/api///"),
            "http://localhost:5000/api"
        );
        assert_eq!(
            normalize_base_url("  https://tutor.example.com/api/ "),
            "https://tutor.example.com/api"
        );
        assert_eq!(normalize_base_url("///"), "");
    }

    #[test]
    fn construct_joins_endpoints() {
        assert_eq!(
            construct_api_url("http://localhost:5000/api", "languages"),
            "http://localhost:5000/api/languages"
        );
        assert_eq!(
            construct_api_url("http://localhost:5000/api/", "///evaluate"),
            "http://localhost:5000/api/evaluate"
        );
        assert_eq!(
            construct_api_url("http://h/api", "session/abc/clear"),
            "http://h/api/session/abc/clear"
        );
    }

    #[test]
    fn http_url_detection() {
        assert!(is_http_url("http://localhost:5000/api"));
        assert!(is_http_url(" https://tutor.example.com"));
        assert!(!is_http_url("localhost:5000"));
        assert!(!is_http_url("ftp://example.com"));
    }
}
