//! Log sanitization utilities.
//!
//! Upstream response bodies can be large (full order payloads with line
//! items), so they are truncated before being written to logs.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Truncates a string for logging on a char boundary.
///
/// Returns the original string if it fits, otherwise the first
/// `TRUNCATE_LIMIT` bytes followed by the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }

    let mut end = TRUNCATE_LIMIT;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}... [truncated, total {} bytes]", &s[..end], s.len())
}

/// Masks a bearer token for startup summaries, keeping the last four chars.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }

    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("***{tail}")
}
