//! Original URL validation.
//!
//! URLs are stored exactly as submitted so that key derivation stays
//! deterministic for a given input string. Validation only decides whether the
//! input is an absolute URL we are willing to redirect to.

use url::Url;

/// Reasons an original URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Checks that `input` is an absolute `http` or `https` URL with a host.
///
/// Rejects relative references (`/path`, `example.com`) as well as schemes
/// such as `javascript:`, `data:` and `file:`.
///
/// # Errors
///
/// See [`UrlValidationError`] for the individual failure reasons.
pub fn validate_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        for input in [
            "https://www.google.com/",
            "http://example.com",
            "https://example.com:8443/path?q=1#frag",
            "http://127.0.0.1:3000/",
        ] {
            assert!(validate_url(input).is_ok(), "{input} should be valid");
        }
    }

    #[test]
    fn test_empty_url() {
        assert_eq!(validate_url(""), Err(UrlValidationError::Empty));
        assert_eq!(validate_url("   "), Err(UrlValidationError::Empty));
    }

    #[test]
    fn test_relative_url_is_rejected() {
        assert!(matches!(
            validate_url("asdasdffsadklj"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_url("/just/a/path"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_dangerous_schemes_are_rejected() {
        for input in ["javascript:alert(1)", "data:text/html,hi", "file:///etc/passwd"] {
            assert_eq!(
                validate_url(input),
                Err(UrlValidationError::UnsupportedProtocol),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_host_is_parsed() {
        let url = validate_url("https://EXAMPLE.com").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
    }
}
