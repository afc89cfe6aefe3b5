// src/normalize/tokens.rs
use once_cell::sync::Lazy;

/// Street-type tokens seen in scraped Georgian addresses: abbreviations,
/// full forms, and the Roman-numeral lane ordinals.
pub const STREET_TOKENS: &[&str] = &[
    "ქ.",
    "ქუჩა",
    "გამზ.",
    "გამზირი",
    "ჩიხ.",
    "ჩიხი",
    "შეს.",
    "შესახვევი",
    "მოედანი",
    "პროსპექტ",
    "პლ.",
    "დაღმ.",
    "ხეივ.",
    "ხეივანი",
    "კვარტ.",
    "კვარტალი",
    "გზატკეცილი",
    "I",
    "II",
    "III",
    "IV",
    "V",
    "VI",
    "VII",
    "VIII",
    "IX",
    "X",
];

/// Abbreviated token variants rewritten to one canonical spelling.
/// Declaration order is application order; overlapping variants must be
/// listed longest-first.
pub const TOKEN_CANONICAL_PAIRS: &[(&str, &str)] = &[
    ("ქ.", "ქუჩა"),
    ("გამზ.", "გამზირი"),
    ("ჩიხ.", "ჩიხი"),
    ("შეს.", "შესახვევი"),
    ("კვარტ.", "კვარტალი"),
    ("ხეივ.", "ხეივანი"),
    ("დაღმ.", "დაღმართი"),
];

/// Regex alternation over [`STREET_TOKENS`], longest token first so that
/// e.g. "III" wins over "I" and "ქუჩა" over shorter fragments.
pub static STREET_TOKEN_PATTERN: Lazy<String> = Lazy::new(|| {
    let mut tokens: Vec<&str> = STREET_TOKENS.to_vec();
    tokens.sort_by(|a, b| b.len().cmp(&a.len()));
    tokens
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|")
});

/// Rewrite every known abbreviated street-token variant to its canonical
/// spelling. Returns the input unchanged when no variant occurs.
pub fn canonicalize_tokens(input: &str) -> String {
    let mut s = input.to_string();
    for (variant, canonical) in TOKEN_CANONICAL_PAIRS {
        if s.contains(variant) {
            s = s.replace(variant, canonical);
        }
    }
    s
}
