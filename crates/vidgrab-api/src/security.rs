//! URL sanitization and validation.
//!
//! Two independent layers run before anything else touches a URL:
//! character stripping (the sanitizer) and structural checks (the
//! validator). Stripping alone does not guarantee a well-formed public
//! URL, and structural validation alone does not remove shell
//! metacharacters hidden inside an otherwise valid component, so both
//! are required. Subprocess arguments are additionally passed as an
//! argument vector, never a shell line, making the sanitizer a second
//! line of defense rather than the only one.

use url::Url;

/// Maximum accepted URL length.
pub const MAX_URL_LENGTH: usize = 2048;

/// Shell metacharacters stripped from incoming URLs.
const STRIPPED_CHARS: &[char] = &[
    ';', '&', '|', '`', '$', '(', ')', '{', '}', '[', ']', '<', '>',
];

/// Strip shell metacharacters and surrounding whitespace.
///
/// Everything downstream of this function, including every subprocess
/// invocation, operates only on its output.
pub fn sanitize_url(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect()
}

/// Structural and scope checks on a sanitized URL.
///
/// Accepts only absolute http(s) URLs with a non-empty hostname of at
/// most 253 characters that is not loopback or a private range.
pub fn validate_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }

    let Some(host) = parsed.host_str() else {
        return false;
    };
    if host.is_empty() || host.len() > 253 {
        return false;
    }
    if host == "localhost" || host.starts_with("127.") || host.starts_with("192.168.") {
        return false;
    }

    true
}
