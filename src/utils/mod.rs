//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Parse a base URL so that relative paths join *under* it.
///
/// `Url::join` replaces the last path segment unless the base ends with a
/// slash, which would turn `.../api/v1` + `books` into `.../api/books`.
pub fn base_url(raw: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Resolve an endpoint path against a base URL.
pub fn join_path(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    base.join(path.trim_start_matches('/'))
}

/// Guess a MIME type from a file extension, for uploads.
pub fn mime_from_path(path: &std::path::Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_base_url_adds_trailing_slash() {
        let base = base_url("http://localhost:9090/api/v1").unwrap();
        assert_eq!(base.as_str(), "http://localhost:9090/api/v1/");
    }

    #[test]
    fn test_join_path() {
        let base = base_url("http://localhost:9090/api/v1").unwrap();
        assert_eq!(
            join_path(&base, "books/owner").unwrap().as_str(),
            "http://localhost:9090/api/v1/books/owner"
        );
        assert_eq!(
            join_path(&base, "/books/7").unwrap().as_str(),
            "http://localhost:9090/api/v1/books/7"
        );
    }

    #[test]
    fn test_mime_from_path() {
        assert_eq!(mime_from_path(Path::new("cover.JPG")), "image/jpeg");
        assert_eq!(mime_from_path(Path::new("cover.png")), "image/png");
        assert_eq!(mime_from_path(Path::new("cover")), "application/octet-stream");
    }
}
