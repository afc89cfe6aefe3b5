// src/resolve/regional.rs
use rayon::prelude::*;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

use crate::model::ListingRecord;
use crate::normalize::{normalize_street_key, street_base_name};
use crate::resolve::unresolved::Placeholders;

/// Fill unresolved `district_name` values for one city's rows from its
/// street → district reference map, in three cascading passes:
///
/// 1. district-name substring scan over the raw street address,
/// 2. exact match on the normalized street key,
/// 3. exact match on the token-stripped base key.
///
/// Each pass re-checks the unresolved mask per row immediately before
/// writing, so a row resolved by an earlier pass is never touched again.
/// Rows still unmatched afterwards have placeholder values cleared to
/// `None`; no sentinel is written. Returns the number of rows resolved.
pub fn resolve_city_streets(
    records: &mut [ListingRecord],
    rows: &[usize],
    city: &str,
    street_map: &BTreeMap<String, String>,
    base_placeholders: &Placeholders,
) -> usize {
    // A district equal to its own city name means the source row was
    // malformed, so it counts as missing here.
    let placeholders = base_placeholders.with_city(city);

    // ─── pass 1: district-name substring scan ────────────────────────
    let district_names = ordered_district_names(street_map);
    let mut pass1 = 0;
    for &idx in rows {
        let rec = &mut records[idx];
        if !placeholders.is_unresolved(rec.district_name.as_deref()) {
            continue;
        }
        let Some(street) = rec.street_address.as_deref() else {
            continue;
        };
        if let Some(district) = district_names.iter().find(|d| street.contains(d.as_str())) {
            rec.district_name = Some(district.clone());
            pass1 += 1;
        }
    }
    debug!(city, resolved = pass1, "pass 1: district-name substring scan");

    // Street keys are per-row independent, so normalize them in parallel.
    let keys: Vec<(usize, Option<String>)> = {
        let recs: &[ListingRecord] = records;
        rows.par_iter()
            .map(|&idx| (idx, normalize_street_key(recs[idx].street_address.as_deref())))
            .collect()
    };

    // ─── pass 2: normalized exact match ──────────────────────────────
    let normalized_map = build_lookup(
        city,
        street_map
            .iter()
            .filter_map(|(street, district)| {
                normalize_street_key(Some(street.as_str())).map(|key| (key, district.as_str()))
            }),
    );

    let mut pass2 = 0;
    for (idx, key) in &keys {
        let rec = &mut records[*idx];
        if !placeholders.is_unresolved(rec.district_name.as_deref()) {
            continue;
        }
        if let Some(district) = key.as_deref().and_then(|k| normalized_map.get(k)) {
            rec.district_name = Some((*district).to_string());
            pass2 += 1;
        }
    }
    debug!(city, resolved = pass2, "pass 2: normalized street match");

    // ─── pass 3: token-agnostic base-name match ──────────────────────
    let base_map = build_lookup(
        city,
        normalized_map
            .iter()
            .filter_map(|(key, district)| street_base_name(key).map(|base| (base, *district))),
    );

    let mut pass3 = 0;
    for (idx, key) in &keys {
        let rec = &mut records[*idx];
        if !placeholders.is_unresolved(rec.district_name.as_deref()) {
            continue;
        }
        let base = key.as_deref().and_then(street_base_name);
        if let Some(district) = base.as_deref().and_then(|b| base_map.get(b)) {
            rec.district_name = Some((*district).to_string());
            pass3 += 1;
        }
    }
    debug!(city, resolved = pass3, "pass 3: base street-name match");

    // Unmatched rows stay unresolved as plain `None`; the downstream
    // bucketing owns any sentinel labelling.
    for &idx in rows {
        let rec = &mut records[idx];
        if rec.district_name.is_some() && placeholders.is_unresolved(rec.district_name.as_deref()) {
            rec.district_name = None;
        }
    }

    let resolved = pass1 + pass2 + pass3;
    info!(
        city,
        rows = rows.len(),
        pass1,
        pass2,
        pass3,
        "regional district resolution done"
    );
    resolved
}

/// Distinct district names from the map values, longest first (chars), ties
/// lexicographic, so a substring scan over overlapping names is
/// deterministic and prefers the more specific name.
fn ordered_district_names(street_map: &BTreeMap<String, String>) -> Vec<String> {
    let mut names: Vec<String> = street_map
        .values()
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();
    names.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    names
}

/// Build a key → district lookup. On collisions the first entry (in the
/// caller's lexicographic street order) wins; a collision that disagrees on
/// the district is logged as a data-quality warning.
fn build_lookup<'a>(
    city: &str,
    pairs: impl Iterator<Item = (String, &'a str)>,
) -> BTreeMap<String, &'a str> {
    let mut lookup = BTreeMap::new();
    for (key, district) in pairs {
        match lookup.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(district);
            }
            Entry::Occupied(slot) => {
                if *slot.get() != district {
                    warn!(
                        city,
                        key = %slot.key(),
                        kept = %slot.get(),
                        dropped = %district,
                        "street key collision across districts, keeping first entry"
                    );
                }
            }
        }
    }
    lookup
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kutaisi_map() -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("გამარჯვების III შესახვევი".into(), "აღმაშენებელი".into());
        map.insert("განჯის ქ. 15".into(), "ბალახვანი".into());
        map.insert("მ. ლებანიძის გამზ.".into(), "გორა".into());
        map.insert("თამარ მეფის ქუჩა".into(), "გორა".into());
        map
    }

    fn run(records: &mut [ListingRecord]) -> usize {
        let rows: Vec<usize> = (0..records.len()).collect();
        resolve_city_streets(
            records,
            &rows,
            "ქუთაისი",
            &kutaisi_map(),
            &Placeholders::default_set(),
        )
    }

    #[test]
    fn pass1_matches_district_name_inside_raw_address() {
        let mut records = vec![ListingRecord::new("ქუთაისი").with_street("გორა, წერეთლის 3")];
        assert_eq!(run(&mut records), 1);
        assert_eq!(records[0].district_name.as_deref(), Some("გორა"));
    }

    #[test]
    fn pass2_matches_after_token_canonicalization() {
        let mut records = vec![
            ListingRecord::new("ქუთაისი").with_street("გამარჯვების III შეს."),
            ListingRecord::new("ქუთაისი").with_street("განჯის ქუჩა"),
        ];
        assert_eq!(run(&mut records), 2);
        assert_eq!(records[0].district_name.as_deref(), Some("აღმაშენებელი"));
        assert_eq!(records[1].district_name.as_deref(), Some("ბალახვანი"));
    }

    #[test]
    fn pass3_matches_on_base_name_across_street_types() {
        // map says გამზირი, the listing says ქუჩა; only the base name agrees
        let mut records = vec![ListingRecord::new("ქუთაისი").with_street("მ. ლებანიძის ქუჩა")];
        assert_eq!(run(&mut records), 1);
        assert_eq!(records[0].district_name.as_deref(), Some("გორა"));
    }

    #[test]
    fn unknown_street_stays_unresolved_without_sentinel() {
        let mut records = vec![
            ListingRecord::new("ქუთაისი").with_street("უცნობი ქუჩა 99"),
            ListingRecord::new("ქუთაისი")
                .with_street("უცნობი ქუჩა 99")
                .with_district("n.a"),
        ];
        assert_eq!(run(&mut records), 0);
        assert_eq!(records[0].district_name, None);
        // placeholder cleared, not echoed back
        assert_eq!(records[1].district_name, None);
    }

    #[test]
    fn resolved_rows_are_never_overwritten() {
        let mut records = vec![ListingRecord::new("ქუთაისი")
            .with_street("განჯის ქუჩა")
            .with_district("საფიჩხია")];
        assert_eq!(run(&mut records), 0);
        assert_eq!(records[0].district_name.as_deref(), Some("საფიჩხია"));
    }

    #[test]
    fn district_equal_to_city_is_reassigned() {
        let mut records = vec![ListingRecord::new("ქუთაისი")
            .with_street("განჯის ქუჩა")
            .with_district("ქუთაისი")];
        assert_eq!(run(&mut records), 1);
        assert_eq!(records[0].district_name.as_deref(), Some("ბალახვანი"));
    }

    #[test]
    fn collision_keeps_first_street_in_lexicographic_order() {
        let mut map = BTreeMap::new();
        // both normalize to "განჯისქუჩა"
        map.insert("განჯის ქ.".to_string(), "ბალახვანი".to_string());
        map.insert("განჯის ქუჩა".to_string(), "გორა".to_string());

        let mut records = vec![ListingRecord::new("ქუთაისი").with_street("განჯის ქუჩა 7")];
        let rows = vec![0];
        resolve_city_streets(
            &mut records,
            &rows,
            "ქუთაისი",
            &map,
            &Placeholders::default_set(),
        );
        // "განჯის ქ." sorts before "განჯის ქუჩა", so its district wins
        assert_eq!(records[0].district_name.as_deref(), Some("ბალახვანი"));
    }

    #[test]
    fn overlapping_district_names_prefer_the_longer() {
        let mut map = BTreeMap::new();
        map.insert("ა".to_string(), "გორა".to_string());
        map.insert("ბ".to_string(), "გორაკი".to_string());

        let mut records = vec![ListingRecord::new("ქუთაისი").with_street("გორაკის მხარეს")];
        let rows = vec![0];
        resolve_city_streets(
            &mut records,
            &rows,
            "ქუთაისი",
            &map,
            &Placeholders::default_set(),
        );
        assert_eq!(records[0].district_name.as_deref(), Some("გორაკი"));
    }

    #[test]
    fn only_listed_rows_are_touched() {
        let mut records = vec![
            ListingRecord::new("ქუთაისი").with_street("განჯის ქუჩა"),
            ListingRecord::new("ქუთაისი").with_street("განჯის ქუჩა"),
        ];
        let rows = vec![1];
        resolve_city_streets(
            &mut records,
            &rows,
            "ქუთაისი",
            &kutaisi_map(),
            &Placeholders::default_set(),
        );
        assert_eq!(records[0].district_name, None);
        assert_eq!(records[1].district_name.as_deref(), Some("ბალახვანი"));
    }
}
