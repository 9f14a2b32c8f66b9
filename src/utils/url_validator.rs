//! Validation of destination URLs.
//!
//! A destination is stored exactly as submitted; validation only decides
//! whether it is acceptable as a redirect target.

use url::Url;

/// Reasons a destination URL is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must contain a host")]
    MissingHost,
}

/// Checks that `input` is an absolute HTTP(S) URL with a host.
///
/// Rejects `javascript:`, `data:`, `file:` and other schemes that must never
/// end up in a `Location` header.
///
/// # Errors
///
/// See [`UrlValidationError`] for the rejection reasons.
///
/// # Examples
///
/// ```
/// use short_link_store::utils::url_validator::validate_original_url;
///
/// assert!(validate_original_url("https://example.com/a?b=c").is_ok());
/// assert!(validate_original_url("not a url").is_err());
/// ```
pub fn validate_original_url(input: &str) -> Result<Url, UrlValidationError> {
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
