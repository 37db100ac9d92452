use regex::{Regex, RegexBuilder};

use crate::shared::constants::DEFAULT_XSS_PATTERNS;

/// Case-insensitive denylist applied to user-supplied text.
///
/// Matches are removed outright. This is pattern stripping, not full HTML
/// sanitization; the pattern list is injected from configuration so
/// deployments can tighten it (see `ContentPolicyConfig`).
#[derive(Debug)]
pub struct Sanitizer {
    patterns: Vec<Regex>,
}

impl Sanitizer {
    /// Compile a sanitizer from configured patterns.
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| {
                RegexBuilder::new(p.as_ref())
                    .case_insensitive(true)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Remove every denylisted pattern from the text.
    pub fn clean(&self, text: &str) -> String {
        let mut cleaned = text.to_string();
        for pattern in &self.patterns {
            if pattern.is_match(&cleaned) {
                cleaned = pattern.replace_all(&cleaned, "").into_owned();
            }
        }
        cleaned
    }

    /// Clean an optional field, passing blank values through untouched.
    pub fn clean_opt(&self, text: Option<String>) -> Option<String> {
        text.map(|t| {
            if t.trim().is_empty() {
                t
            } else {
                self.clean(&t)
            }
        })
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::from_patterns(DEFAULT_XSS_PATTERNS).expect("default denylist patterns compile")
    }
}
