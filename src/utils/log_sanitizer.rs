//! Log sanitization utilities for masking personal data.
//!
//! Emails and bearer tokens are masked before they reach the log output.

fn visible_prefix(value: &str, visible: usize) -> &str {
    match value.char_indices().nth(visible) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

/// Mask an email address for safe logging.
///
/// Keeps at most the first 3 characters of the local part, then the domain.
///
/// # Examples
/// ```ignore
/// assert_eq!(mask_email("user@example.com"), "use***@example.com");
/// ```
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => format!("{}***@{}", visible_prefix(local, 3), domain),
        None => format!("{}***", visible_prefix(email, 3)),
    }
}

/// Mask a bearer token, keeping a short prefix to correlate log lines.
pub fn mask_token(token: &str) -> String {
    format!("{}***", visible_prefix(token, 8))
}
