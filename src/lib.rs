//! Deterministic district resolution for scraped apartment listings.
//!
//! Listings arrive with dirty street addresses and often no usable district.
//! This crate fills missing or placeholder `district_name` values from two
//! read-only reference sources: a per-city street → district map (matched
//! through a cascade of substring, normalized-key, and base-name passes) and,
//! for one designated city, a canonical district-name variant map matched
//! against the free-text description.
//!
//! Already-resolved rows are never overwritten, row order and count are
//! preserved, and an unmatched row simply stays unresolved — that is a data
//! quality outcome for downstream bucketing, not an error.

pub mod maps;
pub mod model;
pub mod normalize;
pub mod resolve;

pub use maps::{CityStreetMaps, DistrictVariants};
pub use model::ListingRecord;
pub use resolve::{Placeholders, Resolver};
