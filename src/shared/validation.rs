use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;
use validator::ValidationError;

lazy_static! {
    /// Regex for validating URL-friendly slugs.
    /// Must be lowercase alphanumeric with single hyphen separators.
    /// - Valid: "budgeting-101", "post123", "my-first-post"
    /// - Invalid: "-post", "post-", "post--title", "Post", "post_title"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    /// Regex for hex color codes (e.g. "#FF0000" or "#fff")
    pub static ref HEX_COLOR_REGEX: Regex = Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").unwrap();

    /// Simplified CSS color name check; a full list would be required for
    /// complete validation
    pub static ref CSS_COLOR_NAME_REGEX: Regex = Regex::new(r"^[a-zA-Z]+$").unwrap();
}

/// Parse an absolute http/https URL, rejecting every other scheme.
pub fn parse_http_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url),
        _ => None,
    }
}

/// True when the value is an absolute URL with an http or https scheme.
pub fn is_absolute_http_url(raw: &str) -> bool {
    parse_http_url(raw).is_some()
}

/// Build a coded `ValidationError` with a caller-facing message.
pub fn validation_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("budgeting-101"));
        assert!(SLUG_REGEX.is_match("post123"));
        assert!(SLUG_REGEX.is_match("my-first-post"));
        assert!(SLUG_REGEX.is_match("a"));
        assert!(SLUG_REGEX.is_match("a-b-c"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-post")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("post-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("post--title")); // double hyphen
        assert!(!SLUG_REGEX.is_match("Post")); // uppercase
        assert!(!SLUG_REGEX.is_match("post_title")); // underscore
        assert!(!SLUG_REGEX.is_match("")); // empty
        assert!(!SLUG_REGEX.is_match("post title")); // space
    }

    #[test]
    fn test_hex_color_regex() {
        assert!(HEX_COLOR_REGEX.is_match("#FF0000"));
        assert!(HEX_COLOR_REGEX.is_match("#fff"));
        assert!(HEX_COLOR_REGEX.is_match("#A1b2C3"));
        assert!(!HEX_COLOR_REGEX.is_match("FF0000")); // missing hash
        assert!(!HEX_COLOR_REGEX.is_match("#FF00")); // wrong length
        assert!(!HEX_COLOR_REGEX.is_match("#GG0000")); // non-hex digits
    }

    #[test]
    fn test_css_color_name_regex() {
        assert!(CSS_COLOR_NAME_REGEX.is_match("red"));
        assert!(CSS_COLOR_NAME_REGEX.is_match("DarkSlateBlue"));
        assert!(!CSS_COLOR_NAME_REGEX.is_match("dark-blue"));
        assert!(!CSS_COLOR_NAME_REGEX.is_match("rgb(0,0,0)"));
    }

    #[test]
    fn test_absolute_http_url() {
        assert!(is_absolute_http_url("https://example.com/file.pdf"));
        assert!(is_absolute_http_url("http://example.com"));
        assert!(!is_absolute_http_url("ftp://example.com/file.pdf"));
        assert!(!is_absolute_http_url("javascript:alert(1)"));
        assert!(!is_absolute_http_url("/relative/path"));
        assert!(!is_absolute_http_url("not a url"));
    }
}
