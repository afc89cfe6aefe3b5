// src/model.rs
use serde::{Deserialize, Serialize};

/// One scraped apartment listing, as handed over by the upstream scrapers.
///
/// Identity is positional: resolution mutates `district_name` in place and
/// never reorders, inserts, or removes rows. `city` is read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub city: String,
    pub street_address: Option<String>,
    pub description: Option<String>,
    pub district_name: Option<String>,
}

impl ListingRecord {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            street_address: None,
            description: None,
            district_name: None,
        }
    }

    pub fn with_street(mut self, street: impl Into<String>) -> Self {
        self.street_address = Some(street.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district_name = Some(district.into());
        self
    }
}
