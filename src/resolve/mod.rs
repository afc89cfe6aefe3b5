// src/resolve/mod.rs
mod description;
mod regional;
mod unresolved;

pub use unresolved::Placeholders;

use std::collections::HashMap;
use tracing::{info, instrument};

use crate::maps::{CityStreetMaps, DistrictVariants};
use crate::model::ListingRecord;

/// Fills missing `district_name` values in place, city by city.
///
/// The regional street-map phase always runs before the description phase,
/// so a street-level match takes precedence over a free-text one when both
/// could apply. Reference maps are loaded once by the caller and injected
/// here read-only.
pub struct Resolver {
    street_maps: CityStreetMaps,
    variants: DistrictVariants,
    description_city: String,
    placeholders: Placeholders,
}

impl Resolver {
    /// `description_city` is the one city whose districts are resolved from
    /// listing descriptions rather than street addresses (თბილისი in the
    /// production configuration).
    pub fn new(
        street_maps: CityStreetMaps,
        variants: DistrictVariants,
        description_city: impl Into<String>,
    ) -> Self {
        Self {
            street_maps,
            variants,
            description_city: description_city.into(),
            placeholders: Placeholders::default_set(),
        }
    }

    pub fn with_placeholders(mut self, placeholders: Placeholders) -> Self {
        self.placeholders = placeholders;
        self
    }

    /// Resolve districts across the whole table. Rows are grouped by city
    /// (stable, first-seen order) and addressed by index, so row count and
    /// order are preserved by construction. Returns the number of rows
    /// newly resolved in this run.
    #[instrument(level = "info", skip_all, fields(rows = records.len()))]
    pub fn resolve(&self, records: &mut [ListingRecord]) -> usize {
        let groups = group_by_city(records);

        let mut resolved = 0;
        for (city, rows) in &groups {
            if let Some(street_map) = self.street_maps.get(city) {
                resolved +=
                    regional::resolve_city_streets(records, rows, city, street_map, &self.placeholders);
            }
        }

        if let Some((city, rows)) = groups
            .iter()
            .find(|(city, _)| *city == self.description_city)
        {
            resolved += description::resolve_descriptions(
                records,
                rows,
                city,
                &self.variants,
                &self.placeholders,
            );
        }

        info!(resolved, "district resolution run complete");
        resolved
    }
}

/// Group row indices by city, first-seen city order, original row order
/// within each group.
fn group_by_city(records: &[ListingRecord]) -> Vec<(String, Vec<usize>)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    for (idx, rec) in records.iter().enumerate() {
        let slot = *slots.entry(rec.city.as_str()).or_insert_with(|| {
            groups.push((rec.city.clone(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(idx);
    }
    groups
}
