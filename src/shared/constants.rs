// =============================================================================
// FIELD LENGTH LIMITS
// =============================================================================

/// Maximum length for category names
pub const CATEGORY_NAME_MAX_LEN: usize = 100;

/// Maximum length for category descriptions
pub const CATEGORY_DESCRIPTION_MAX_LEN: usize = 500;

/// Maximum length for category colors (hex code or CSS color name)
pub const CATEGORY_COLOR_MAX_LEN: usize = 50;

/// Maximum length for user identifiers
pub const USER_ID_MAX_LEN: usize = 450;

/// Maximum length for post and lead magnet titles
pub const TITLE_MAX_LEN: usize = 255;

/// Maximum length for post meta descriptions
pub const META_DESCRIPTION_MAX_LEN: usize = 300;

/// Maximum length for lead magnet form-action and download URLs
pub const URL_MAX_LEN: usize = 500;

// =============================================================================
// POST LISTING BOUNDS
// =============================================================================

/// Minimum number of recent posts a single request may ask for
pub const DEFAULT_MIN_RECENT_POSTS: i64 = 1;

/// Maximum number of recent posts a single request may ask for
pub const DEFAULT_MAX_RECENT_POSTS: i64 = 100;

/// Cap on the number of rows a published-post search returns
pub const DEFAULT_SEARCH_RESULTS_CAP: i64 = 50;

/// Upper bound on category hierarchy depth walked by the cycle guard
pub const CATEGORY_MAX_DEPTH: usize = 32;

// =============================================================================
// SECURITY DENYLISTS
// =============================================================================

/// Default case-insensitive patterns stripped from text content.
/// A denylist is a stop-gap, not full HTML sanitization; deployments can
/// tighten the list through `SANITIZER_DENYLIST` without a redeploy.
pub const DEFAULT_XSS_PATTERNS: &[&str] = &[
    r"<script\b[\s\S]*?</script>", // script tags with body
    r"<style\b[\s\S]*?</style>",   // style tags with body
    r"javascript:",                // javascript protocol
    r"on\w+\s*=",                  // inline event handlers (onclick, onerror, ...)
    r"<iframe\b",                  // iframe tags
    r"<object\b",                  // object tags
    r"<embed\b",                   // embed tags
];

/// Patterns rejected in slugs to block path traversal and protocol injection.
pub const URL_INJECTION_PATTERNS: &[&str] = &[
    r"\.\./",     // path traversal
    r"\.\.\\",    // path traversal (Windows)
    r"%2e%2e%2f", // URL-encoded path traversal
    r"%2e%2e%5c", // URL-encoded path traversal (Windows)
    r"javascript:",
    r"data:",
    r"vbscript:",
    r"on\w+\s*=", // event handlers
];

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Administrator role - full access to every tenant's content
pub const ROLE_ADMIN: &str = "admin";

/// Author role - can manage own categories, posts, and lead magnets
pub const ROLE_AUTHOR: &str = "author";
