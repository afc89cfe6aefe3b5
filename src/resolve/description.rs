// src/resolve/description.rs
use tracing::info;

use crate::maps::DistrictVariants;
use crate::model::ListingRecord;
use crate::resolve::unresolved::Placeholders;

/// Fill unresolved `district_name` values for the designated city's rows by
/// scanning the listing description for a known district-name variant.
///
/// Variants are tried in the load-time order, longest first, so a phrase
/// that contains another district's name as a substring always wins over
/// it. Rows with no matching variant stay unresolved; placeholders are
/// cleared to `None`. Returns the number of rows resolved.
pub fn resolve_descriptions(
    records: &mut [ListingRecord],
    rows: &[usize],
    city: &str,
    variants: &DistrictVariants,
    base_placeholders: &Placeholders,
) -> usize {
    let placeholders = base_placeholders.with_city(city);

    let mut resolved = 0;
    for &idx in rows {
        let rec = &mut records[idx];
        if !placeholders.is_unresolved(rec.district_name.as_deref()) {
            continue;
        }

        let description = rec.description.as_deref().unwrap_or("");
        match variants
            .iter()
            .find(|(variant, _)| description.contains(variant))
        {
            Some((_, district)) => {
                rec.district_name = Some(district.to_string());
                resolved += 1;
            }
            None => {
                rec.district_name = None;
            }
        }
    }

    info!(
        city,
        rows = rows.len(),
        resolved,
        variants = variants.len(),
        "description district resolution done"
    );
    resolved
}
