//! Slug, meta-description, and featured-image checks for posts.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use validator::ValidationError;

use crate::core::config::ContentPolicyConfig;
use crate::core::error::{AppError, Result};
use crate::shared::constants::{META_DESCRIPTION_MAX_LEN, TITLE_MAX_LEN, URL_INJECTION_PATTERNS};
use crate::shared::validation::{parse_http_url, validation_error, SLUG_REGEX};

lazy_static! {
    static ref URL_INJECTION_REGEXES: Vec<Regex> = URL_INJECTION_PATTERNS
        .iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .expect("URL injection patterns compile")
        })
        .collect();
}

/// True when the slug is URL-friendly: its own lowercased form, alphanumeric
/// with single hyphen separators, no leading/trailing hyphen.
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.trim().is_empty() {
        return false;
    }
    if slug != slug.to_lowercase() {
        return false;
    }
    SLUG_REGEX.is_match(slug)
}

/// True when the slug carries traversal or protocol patterns usable for URL
/// injection.
pub fn contains_url_injection_patterns(slug: &str) -> bool {
    if slug.trim().is_empty() {
        return false;
    }
    URL_INJECTION_REGEXES.iter().any(|p| p.is_match(slug))
}

/// Full slug check with a distinct message per failure cause.
pub fn validate_slug(slug: &str) -> Result<()> {
    if !is_valid_slug(slug) {
        return Err(AppError::Validation(
            "Slug must be URL-friendly (lowercase, alphanumeric characters and hyphens only)."
                .to_string(),
        ));
    }
    if contains_url_injection_patterns(slug) {
        return Err(AppError::Validation(
            "Slug contains invalid characters that could be used for URL injection.".to_string(),
        ));
    }
    Ok(())
}

pub fn check_title(title: &str) -> std::result::Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(validation_error("required", "Title is required."));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(validation_error(
            "length",
            format!("Title cannot exceed {} characters.", TITLE_MAX_LEN),
        ));
    }
    Ok(())
}

pub fn is_valid_meta_description(meta_description: &str) -> bool {
    meta_description.chars().count() <= META_DESCRIPTION_MAX_LEN
}

pub fn check_meta_description(meta_description: &str) -> std::result::Result<(), ValidationError> {
    if !is_valid_meta_description(meta_description) {
        return Err(validation_error(
            "length",
            format!(
                "MetaDescription cannot exceed {} characters.",
                META_DESCRIPTION_MAX_LEN
            ),
        ));
    }
    Ok(())
}

/// Allow-list policy for featured-image URLs, built from configuration.
#[derive(Debug, Clone, Default)]
pub struct ImageUrlPolicy {
    pub allowed_domains: Vec<String>,
    pub allowed_paths: Vec<String>,
}

impl ImageUrlPolicy {
    pub fn from_config(config: &ContentPolicyConfig) -> Self {
        Self {
            allowed_domains: config.allowed_image_domains.clone(),
            allowed_paths: config.allowed_image_paths.clone(),
        }
    }

    /// Relative paths must be traversal-free (and match the path allow-list
    /// when one is configured). Absolute URLs must be http/https and match
    /// the domain allow-list; with no allow-list configured any https URL is
    /// accepted.
    pub fn is_valid_image_url(&self, image_url: &str) -> bool {
        if image_url.trim().is_empty() {
            return false;
        }

        if image_url.starts_with('/') {
            if image_url.contains("..") {
                return false;
            }
            if !self.allowed_paths.is_empty() {
                let lowered = image_url.to_lowercase();
                return self
                    .allowed_paths
                    .iter()
                    .any(|path| lowered.starts_with(&path.to_lowercase()));
            }
            return true;
        }

        let Some(url) = parse_http_url(image_url) else {
            return false;
        };

        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_lowercase();

        if !self.allowed_domains.is_empty() {
            return self.allowed_domains.iter().any(|domain| {
                let domain = domain.to_lowercase();
                host == domain || host.ends_with(&format!(".{}", domain))
            });
        }

        // No allow-list configured: permissive https-only fallback
        url.scheme() == "https"
    }

    pub fn validate_featured_image_url(&self, image_url: &str) -> Result<()> {
        if !self.is_valid_image_url(image_url) {
            return Err(AppError::Validation(
                "FeaturedImageUrl must point to an allowed domain or relative path.".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_must_be_lowercase_url_friendly() {
        assert!(is_valid_slug("budgeting-101"));
        assert!(is_valid_slug("a"));
        assert!(!is_valid_slug("Budgeting-101"));
        assert!(!is_valid_slug("budgeting_101"));
        assert!(!is_valid_slug("-budgeting"));
        assert!(!is_valid_slug("budgeting-"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn injection_patterns_are_detected() {
        assert!(contains_url_injection_patterns("../etc/passwd"));
        assert!(contains_url_injection_patterns(r"..\windows"));
        assert!(contains_url_injection_patterns("%2e%2e%2fsecret"));
        assert!(contains_url_injection_patterns("javascript:alert(1)"));
        assert!(contains_url_injection_patterns("data:text/html"));
        assert!(contains_url_injection_patterns("onclick=alert(1)"));
        assert!(!contains_url_injection_patterns("budgeting-101"));
    }

    #[test]
    fn validate_slug_reports_format_failures() {
        let err = validate_slug("Not A Slug").unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("URL-friendly")),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(validate_slug("budgeting-101").is_ok());
    }

    #[test]
    fn relative_image_paths_reject_traversal() {
        let policy = ImageUrlPolicy::default();
        assert!(policy.is_valid_image_url("/images/header.png"));
        assert!(!policy.is_valid_image_url("/images/../secret.png"));
    }

    #[test]
    fn configured_path_allow_list_is_enforced() {
        let policy = ImageUrlPolicy {
            allowed_domains: Vec::new(),
            allowed_paths: vec!["/images/".to_string(), "/assets/".to_string()],
        };
        assert!(policy.is_valid_image_url("/images/header.png"));
        assert!(policy.is_valid_image_url("/Assets/logo.svg"));
        assert!(!policy.is_valid_image_url("/uploads/header.png"));
    }

    #[test]
    fn absolute_urls_follow_domain_allow_list() {
        let policy = ImageUrlPolicy {
            allowed_domains: vec!["cdn.example.com".to_string()],
            allowed_paths: Vec::new(),
        };
        assert!(policy.is_valid_image_url("https://cdn.example.com/a.png"));
        assert!(policy.is_valid_image_url("http://img.cdn.example.com/a.png"));
        assert!(!policy.is_valid_image_url("https://evil.com/a.png"));
        assert!(!policy.is_valid_image_url("ftp://cdn.example.com/a.png"));
    }

    #[test]
    fn without_allow_list_only_https_absolute_urls_pass() {
        let policy = ImageUrlPolicy::default();
        assert!(policy.is_valid_image_url("https://anywhere.example/a.png"));
        assert!(!policy.is_valid_image_url("http://anywhere.example/a.png"));
        assert!(!policy.is_valid_image_url("javascript:alert(1)"));
    }
}
