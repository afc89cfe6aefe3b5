// src/normalize/mod.rs
mod street;
mod tokens;

pub use street::{normalize_street_key, street_base_name};
pub use tokens::{canonicalize_tokens, STREET_TOKENS, TOKEN_CANONICAL_PAIRS};
