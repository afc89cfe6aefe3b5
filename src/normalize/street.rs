// src/normalize/street.rs
use once_cell::sync::Lazy;
use regex::Regex;

use super::tokens::{canonicalize_tokens, STREET_TOKEN_PATTERN};

static TRAILING_NUMBER_AFTER_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"({})\s*\d+\S*$", &*STREET_TOKEN_PATTERN)).unwrap()
});
static BARE_TRAILING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\d+\S*$").unwrap());
static TRAILING_PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,.;]+$").unwrap());
static ANY_STREET_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("({})", &*STREET_TOKEN_PATTERN)).unwrap());

/// Build the compact exact-match key for a raw street address.
///
/// Steps run in a fixed order; later steps assume the earlier ones already
/// ran (house-number stripping expects canonical tokens). Case is preserved
/// as-is, so identical input always yields an identical key.
///
/// 1. trim
/// 2. canonicalize token variants
/// 3. drop a trailing house number that follows a street token (token kept)
/// 4. drop a bare trailing number with no preceding token
/// 5. drop trailing `,` `.` `;`
/// 6. collapse whitespace runs
/// 7. remove all remaining whitespace
pub fn normalize_street_key(street: Option<&str>) -> Option<String> {
    let raw = street?.trim();
    if raw.is_empty() {
        return None;
    }

    let s = canonicalize_tokens(raw);
    let s = TRAILING_NUMBER_AFTER_TOKEN.replace(&s, "$1");
    let s = BARE_TRAILING_NUMBER.replace(&s, "");
    let s = TRAILING_PUNCTUATION.replace(&s, "");

    let key: String = s.split_whitespace().collect();
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

/// Strip every street-type token from a normalized key, yielding the
/// token-agnostic last-resort key. Tokens may sit back to back since the
/// normalized key carries no whitespace.
pub fn street_base_name(street_norm: &str) -> Option<String> {
    if street_norm.is_empty() {
        return None;
    }
    let base = ANY_STREET_TOKEN.replace_all(street_norm, "");
    if base.is_empty() {
        None
    } else {
        Some(base.into_owned())
    }
}
