use std::env;

use crate::shared::constants::{
    DEFAULT_MAX_RECENT_POSTS, DEFAULT_MIN_RECENT_POSTS, DEFAULT_SEARCH_RESULTS_CAP,
    DEFAULT_XSS_PATTERNS,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub content: ContentPolicyConfig,
    pub posts: PostsConfig,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Denylists and allow-lists applied to user-supplied content.
///
/// The sanitizer patterns default to a compiled-in set but can be tightened
/// through the environment without touching core logic.
#[derive(Debug, Clone)]
pub struct ContentPolicyConfig {
    /// Domains trusted for absolute featured-image URLs. Empty means any
    /// https URL is accepted.
    pub allowed_image_domains: Vec<String>,
    /// Relative path prefixes trusted for featured images. Empty means any
    /// traversal-free path starting with `/` is accepted.
    pub allowed_image_paths: Vec<String>,
    /// Case-insensitive regex denylist stripped from text content.
    pub sanitizer_patterns: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PostsConfig {
    pub min_recent_count: i64,
    pub max_recent_count: i64,
    pub search_results_cap: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            database: DatabaseConfig::from_env()?,
            content: ContentPolicyConfig::from_env(),
            posts: PostsConfig::from_env()?,
        })
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl ContentPolicyConfig {
    pub fn from_env() -> Self {
        Self {
            allowed_image_domains: list_var("ALLOWED_IMAGE_DOMAINS"),
            allowed_image_paths: list_var("ALLOWED_IMAGE_PATHS"),
            sanitizer_patterns: {
                let patterns = list_var("SANITIZER_DENYLIST");
                if patterns.is_empty() {
                    DEFAULT_XSS_PATTERNS.iter().map(|p| p.to_string()).collect()
                } else {
                    patterns
                }
            },
        }
    }
}

impl Default for ContentPolicyConfig {
    fn default() -> Self {
        Self {
            allowed_image_domains: Vec::new(),
            allowed_image_paths: Vec::new(),
            sanitizer_patterns: DEFAULT_XSS_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl PostsConfig {
    pub fn from_env() -> Result<Self, String> {
        let min_recent_count = env::var("POSTS_MIN_RECENT_COUNT")
            .unwrap_or_else(|_| DEFAULT_MIN_RECENT_POSTS.to_string())
            .parse::<i64>()
            .map_err(|_| "POSTS_MIN_RECENT_COUNT must be a valid number".to_string())?;

        let max_recent_count = env::var("POSTS_MAX_RECENT_COUNT")
            .unwrap_or_else(|_| DEFAULT_MAX_RECENT_POSTS.to_string())
            .parse::<i64>()
            .map_err(|_| "POSTS_MAX_RECENT_COUNT must be a valid number".to_string())?;

        let search_results_cap = env::var("POSTS_SEARCH_RESULTS_CAP")
            .unwrap_or_else(|_| DEFAULT_SEARCH_RESULTS_CAP.to_string())
            .parse::<i64>()
            .map_err(|_| "POSTS_SEARCH_RESULTS_CAP must be a valid number".to_string())?;

        if min_recent_count < 1 || max_recent_count < min_recent_count {
            return Err("recent post count bounds must satisfy 1 <= min <= max".to_string());
        }

        Ok(Self {
            min_recent_count,
            max_recent_count,
            search_results_cap,
        })
    }
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            min_recent_count: DEFAULT_MIN_RECENT_POSTS,
            max_recent_count: DEFAULT_MAX_RECENT_POSTS,
            search_results_cap: DEFAULT_SEARCH_RESULTS_CAP,
        }
    }
}

/// Parse a comma-separated env var into a trimmed, non-empty list.
fn list_var(name: &str) -> Vec<String> {
    env::var(name)
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posts_config_defaults_are_within_bounds() {
        let posts = PostsConfig::default();
        assert_eq!(posts.min_recent_count, 1);
        assert_eq!(posts.max_recent_count, 100);
        assert!(posts.search_results_cap > 0);
    }

    #[test]
    fn content_policy_default_carries_compiled_denylist() {
        let content = ContentPolicyConfig::default();
        assert!(!content.sanitizer_patterns.is_empty());
        assert!(content.allowed_image_domains.is_empty());
    }
}
