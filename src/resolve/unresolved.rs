// src/resolve/unresolved.rs

/// The configured set of district values that count as "missing".
///
/// The upstream scrapers emit `"n.a"` for fields they could not read, and
/// malformed source rows sometimes carry the city's own name in the district
/// column. Matching is trim + Unicode lowercase, so `" N.A "` is a
/// placeholder too.
#[derive(Debug, Clone)]
pub struct Placeholders {
    values: Vec<String>,
}

impl Placeholders {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            values: values.into_iter().map(|v| fold(v.as_ref())).collect(),
        }
    }

    /// The placeholder set the production scrapers produce.
    pub fn default_set() -> Self {
        Self::new(["", "n.a", "n/a"])
    }

    /// This set plus the given city name, for passes where a district equal
    /// to its own city must be treated as missing.
    pub fn with_city(&self, city: &str) -> Self {
        let mut values = self.values.clone();
        values.push(fold(city));
        Self { values }
    }

    /// True iff `district_name` counts as missing for matching purposes.
    ///
    /// Consults only the current value, never earlier pass state, so it can
    /// be re-evaluated fresh before every pass.
    pub fn is_unresolved(&self, district_name: Option<&str>) -> bool {
        match district_name {
            None => true,
            Some(v) => {
                let v = fold(v);
                self.values.iter().any(|p| *p == v)
            }
        }
    }
}

fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}
