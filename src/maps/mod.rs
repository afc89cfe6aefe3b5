// src/maps/mod.rs
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Per-city street → district reference data, from a JSON file shaped
/// `{ city: { street: district } }`. Loaded once, read-only for the run.
///
/// `BTreeMap` keeps iteration order deterministic, which the resolver relies
/// on for its documented collision policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct CityStreetMaps(BTreeMap<String, BTreeMap<String, String>>);

impl CityStreetMaps {
    /// Load the reference file. A missing, unreadable, or structurally
    /// invalid file is a fatal configuration error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading street-district map {:?}", path))?;
        let maps: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing street-district map {:?}", path))?;
        if maps.0.is_empty() {
            bail!("street-district map {:?} contains no cities", path);
        }
        Ok(maps)
    }

    pub fn get(&self, city: &str) -> Option<&BTreeMap<String, String>> {
        self.0.get(city)
    }

    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<BTreeMap<String, BTreeMap<String, String>>> for CityStreetMaps {
    fn from(maps: BTreeMap<String, BTreeMap<String, String>>) -> Self {
        Self(maps)
    }
}

/// Description-text variants for the designated city, from a JSON file
/// shaped `{ variant_phrase: canonical_district }`.
///
/// Variants are held sorted longest-first (chars, ties lexicographic) so a
/// longer, more specific phrase always beats a shorter one it contains.
#[derive(Debug, Clone)]
pub struct DistrictVariants {
    ordered: Vec<(String, String)>,
}

impl DistrictVariants {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading district variant map {:?}", path))?;
        let map: BTreeMap<String, String> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing district variant map {:?}", path))?;
        if map.is_empty() {
            bail!("district variant map {:?} is empty", path);
        }
        Ok(Self::from_map(map))
    }

    pub fn from_map(map: BTreeMap<String, String>) -> Self {
        let mut ordered: Vec<(String, String)> = map.into_iter().collect();
        ordered.sort_by(|(a, _), (b, _)| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        Self { ordered }
    }

    /// Variants in matching order, longest first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.ordered.iter().map(|(v, d)| (v.as_str(), d.as_str()))
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
