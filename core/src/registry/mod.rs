//! Region registry: the guessable names of one map and where to label them.
//!
//! A [`RegionSet`] is built once per region table and never mutated; lookups
//! go through the normalized form produced by [`normalize`].

mod table;

pub use table::{load_region_table, parse_region_table};

use hashbrown::HashMap;

/// Canonicalize a region name or a raw guess into its lookup key.
///
/// Trims surrounding whitespace, then title-cases: a letter that follows a
/// non-letter is uppercased, every other letter is lowercased. Characters
/// whose case mapping is not a single character are kept as-is, which keeps
/// `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut out = String::with_capacity(trimmed.len());
    let mut prev_letter = false;

    for ch in trimmed.chars() {
        let mapped = if prev_letter {
            single_char(ch.to_lowercase())
        } else {
            single_char(ch.to_uppercase())
        }
        .unwrap_or(ch);

        out.push(mapped);
        prev_letter = mapped.is_alphabetic();
    }

    out
}

fn single_char(mut mapping: impl Iterator<Item = char>) -> Option<char> {
    let first = mapping.next()?;
    match mapping.next() {
        None => Some(first),
        Some(_) => None,
    }
}

/// A guessable named area with its display name and plotting coordinates.
///
/// Coordinates are centered on the map image with y pointing up.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Name as written in the region table, used for labels and exports
    pub canonical_name: String,
    /// Lookup key, see [`normalize`]
    pub normalized_name: String,
    pub x: f64,
    pub y: f64,
}

impl Region {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        let canonical_name = name.into();
        let normalized_name = normalize(&canonical_name);
        Self {
            canonical_name,
            normalized_name,
            x,
            y,
        }
    }
}

/// Ordered collection of regions keyed by normalized name.
#[derive(Debug, Clone, Default)]
pub struct RegionSet {
    regions: Vec<Region>,
    /// normalized_name -> index into `regions`
    index: HashMap<String, usize>,
}

impl RegionSet {
    /// Build a set from regions in table order.
    ///
    /// When two regions share a normalized name the first one is kept.
    pub fn from_regions(regions: impl IntoIterator<Item = Region>) -> Self {
        let mut set = Self::default();
        for region in regions {
            if set.index.contains_key(&region.normalized_name) {
                tracing::warn!(
                    name = %region.canonical_name,
                    key = %region.normalized_name,
                    "Skipping duplicate region"
                );
                continue;
            }
            set.index
                .insert(region.normalized_name.clone(), set.regions.len());
            set.regions.push(region);
        }
        set
    }

    /// Find a region by its normalized name
    pub fn lookup(&self, normalized_name: &str) -> Option<&Region> {
        self.index
            .get(normalized_name)
            .map(|&idx| &self.regions[idx])
    }

    pub fn contains(&self, normalized_name: &str) -> bool {
        self.index.contains_key(normalized_name)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions in table order
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn normalized_names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.normalized_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "   ",
        " texas ",
        "TEXAS",
        "new york",
        "NEW   mexico",
        "o'neill",
        "bosnia-herzegovina",
        "3rd district",
        "côte d'ivoire",
        "STRAßE",
        "\tnorth carolina\n",
        "İstanbul",
    ];

    #[test]
    fn test_normalize_title_cases_words() {
        assert_eq!(normalize(" texas "), "Texas");
        assert_eq!(normalize("TEXAS"), "Texas");
        assert_eq!(normalize("new york"), "New York");
        assert_eq!(normalize("bosnia-herzegovina"), "Bosnia-Herzegovina");
        assert_eq!(normalize("o'neill"), "O'Neill");
        assert_eq!(normalize("3rd district"), "3Rd District");
        assert_eq!(normalize("côte d'ivoire"), "Côte D'Ivoire");
    }

    #[test]
    fn test_normalize_keeps_internal_whitespace() {
        assert_eq!(normalize("  NEW   mexico "), "New   Mexico");
    }

    #[test]
    fn test_normalize_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\n "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for sample in SAMPLES {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "sample {sample:?}");
        }
    }

    #[test]
    fn test_normalize_ignores_case_and_padding() {
        let variants = ["maine", " MAINE", "mAiNe  ", "\tMaine"];
        for v in variants {
            assert_eq!(normalize(v), "Maine");
        }
    }

    #[test]
    fn test_region_set_lookup() {
        let set = RegionSet::from_regions([
            Region::new("Texas", 10.0, 20.0),
            Region::new("Maine", -5.0, 30.0),
        ]);

        assert_eq!(set.len(), 2);
        assert!(set.contains("Texas"));
        assert!(!set.contains("texas"));
        let maine = set.lookup("Maine").unwrap();
        assert_eq!(maine.x, -5.0);
        assert_eq!(maine.y, 30.0);
        assert!(set.lookup("Ohio").is_none());
    }

    #[test]
    fn test_region_set_keeps_first_duplicate() {
        let set = RegionSet::from_regions([
            Region::new("Georgia", 1.0, 1.0),
            Region::new("GEORGIA", 2.0, 2.0),
            Region::new("Utah", 3.0, 3.0),
        ]);

        assert_eq!(set.len(), 2);
        let georgia = set.lookup("Georgia").unwrap();
        assert_eq!(georgia.canonical_name, "Georgia");
        assert_eq!(georgia.x, 1.0);
        let names: Vec<_> = set.normalized_names().collect();
        assert_eq!(names, vec!["Georgia", "Utah"]);
    }
}
