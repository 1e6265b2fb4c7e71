use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
    })
}

/// Basic syntactic check: something, one `@`, then a domain with at least one dot.
///
/// This does not attempt RFC 5322 validation. It only rejects input that cannot
/// possibly be an address before any request goes out.
pub fn is_email(candidate: &str) -> bool {
    email_re().is_match(candidate)
}

/// Validates `candidate` after stripping surrounding whitespace, returning the trimmed address.
pub fn validate(candidate: &str) -> Result<&str> {
    let candidate: &str = candidate.trim();
    if is_email(candidate) {
        Ok(candidate)
    } else {
        Err(Error::InvalidEmail(candidate.to_string()))
    }
}
