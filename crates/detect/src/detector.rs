use std::collections::HashSet;

use dexsort_catalog::{Catalog, CatalogEntry};
use rayon::prelude::*;
use serde::Serialize;

use crate::overrides::OverrideTable;
use crate::source::ProjectSource;

/// Catch-all bucket for projects that match no catalog entry.
pub const UNMAPPED_LABEL: &str = "_Unmapped";

/// How a project's labels were decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionOrigin {
    /// Catalog matching found at least one label
    Detected,
    /// Exact-name override table
    Override,
    /// Nothing matched; routed to [`UNMAPPED_LABEL`]
    Unmapped,
}

/// Ordered labels for one project. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub labels: Vec<String>,
    pub origin: DetectionOrigin,
}

impl Detection {
    fn unmapped() -> Self {
        Self {
            labels: vec![UNMAPPED_LABEL.to_string()],
            origin: DetectionOrigin::Unmapped,
        }
    }

    /// Owner of the canonical location.
    pub fn primary(&self) -> &str {
        &self.labels[0]
    }

    /// Labels that receive pointers to the canonical location.
    pub fn secondaries(&self) -> &[String] {
        &self.labels[1..]
    }

    pub fn is_unmapped(&self) -> bool {
        self.origin == DetectionOrigin::Unmapped
    }
}

/// Matches project text against a catalog.
pub struct Detector<'a> {
    catalog: &'a Catalog,
    overrides: &'a OverrideTable,
}

impl<'a> Detector<'a> {
    pub fn new(catalog: &'a Catalog, overrides: &'a OverrideTable) -> Self {
        Self { catalog, overrides }
    }

    /// Labels for one project.
    pub fn detect(&self, source: &ProjectSource) -> Detection {
        if let Some(labels) = self.overrides.get(&source.raw_name) {
            log::debug!("{}: override -> {:?}", source.source_id, labels);
            let mut seen = HashSet::new();
            return Detection {
                labels: labels
                    .iter()
                    .filter(|label| seen.insert(label.as_str()))
                    .cloned()
                    .collect(),
                origin: DetectionOrigin::Override,
            };
        }

        let labels = self.match_labels(&source.haystack());
        if labels.is_empty() {
            log::debug!("{}: no catalog match", source.source_id);
            return Detection::unmapped();
        }

        log::debug!("{}: detected {:?}", source.source_id, labels);
        Detection {
            labels,
            origin: DetectionOrigin::Detected,
        }
    }

    /// Detect every source in parallel; output order follows input order.
    pub fn detect_all(&self, sources: &[ProjectSource]) -> Vec<Detection> {
        sources.par_iter().map(|source| self.detect(source)).collect()
    }

    /// Sorted display names of the surviving matches in a padded haystack.
    pub fn match_labels(&self, haystack: &str) -> Vec<String> {
        let candidates: Vec<&CatalogEntry> = self
            .catalog
            .iter()
            .filter(|entry| !entry.key.is_empty() && haystack.contains(&padded(&entry.key)))
            .collect();

        let survivors = candidates.iter().filter(|entry| {
            let needle = padded(&entry.key);
            !candidates
                .iter()
                .any(|other| other.key != entry.key && padded(&other.key).contains(&needle))
        });

        let mut seen = HashSet::new();
        let mut labels: Vec<String> = survivors
            .filter(|entry| seen.insert(entry.display.as_str()))
            .map(|entry| entry.display.clone())
            .collect();

        labels.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        labels
    }
}

fn padded(key: &str) -> String {
    format!(" {key} ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dexsort_catalog::CatalogEntry;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        Catalog::from_entries(vec![
            CatalogEntry::new("pikachu", "Pikachu"),
            CatalogEntry::new("eevee", "Eevee"),
            CatalogEntry::new("charizard", "Charizard"),
            CatalogEntry::new("iron", "Iron"),
            CatalogEntry::new("iron valiant", "Iron Valiant"),
            CatalogEntry::new("mime jr", "Mime Jr."),
            CatalogEntry::new("mr mime", "Mr. Mime"),
            CatalogEntry::new("zard", "Charizard"),
            CatalogEntry::new("absol", "absol"),
        ])
    }

    fn detect(name: &str) -> Detection {
        let catalog = catalog();
        let overrides = OverrideTable::new();
        Detector::new(&catalog, &overrides).detect(&ProjectSource::from_name(name))
    }

    #[test]
    fn whole_word_matching() {
        assert_eq!(detect("pikachu statue").labels, vec!["Pikachu"]);
        assert!(detect("nopikachu").is_unmapped());
        assert!(detect("pikachus").is_unmapped());
    }

    #[test]
    fn multiple_labels_sorted_with_primary_first() {
        let detection = detect("Eevee Pikachu Diorama");
        assert_eq!(detection.labels, vec!["Eevee", "Pikachu"]);
        assert_eq!(detection.primary(), "Eevee");
        assert_eq!(detection.secondaries(), &["Pikachu".to_string()]);
        assert_eq!(detection.origin, DetectionOrigin::Detected);
    }

    #[test]
    fn contained_names_are_suppressed() {
        assert_eq!(detect("iron valiant statue").labels, vec!["Iron Valiant"]);
        assert_eq!(detect("iron valiant and iron").labels, vec!["Iron Valiant"]);
        assert_eq!(detect("iron statue").labels, vec!["Iron"]);
    }

    #[test]
    fn overlapping_but_not_contained_names_both_survive() {
        assert_eq!(detect("mr mime jr").labels, vec!["Mime Jr.", "Mr. Mime"]);
    }

    #[test]
    fn duplicate_displays_collapse() {
        assert_eq!(detect("charizard zard bust").labels, vec!["Charizard"]);
    }

    #[test]
    fn sort_ignores_case() {
        assert_eq!(detect("pikachu absol").labels, vec!["absol", "Pikachu"]);
    }

    #[test]
    fn unmapped_goes_to_catch_all() {
        let detection = detect("Mystery Box");
        assert_eq!(detection.labels, vec![UNMAPPED_LABEL]);
        assert_eq!(detection.primary(), UNMAPPED_LABEL);
        assert!(detection.secondaries().is_empty());
    }

    #[test]
    fn override_short_circuits_detection() {
        let catalog = catalog();
        let mut overrides = OverrideTable::new();
        overrides.insert(
            "Pikachu Charizard Thing",
            vec!["Pikachu".to_string(), "Eevee".to_string()],
        );
        let detector = Detector::new(&catalog, &overrides);

        let detection = detector.detect(&ProjectSource::from_name("Pikachu Charizard Thing"));
        assert_eq!(detection.origin, DetectionOrigin::Override);
        assert_eq!(detection.labels, vec!["Pikachu", "Eevee"]);
        assert_eq!(detection.primary(), "Pikachu");
    }

    #[test]
    fn override_labels_are_deduplicated() {
        let catalog = catalog();
        let mut overrides = OverrideTable::new();
        overrides.insert(
            "Twins",
            vec!["Eevee".to_string(), "Eevee".to_string(), "Pikachu".to_string()],
        );
        let detection =
            Detector::new(&catalog, &overrides).detect(&ProjectSource::from_name("Twins"));
        assert_eq!(detection.labels, vec!["Eevee", "Pikachu"]);
        assert_eq!(detection.primary(), "Eevee");
    }

    #[test]
    fn detect_all_preserves_order() {
        let catalog = catalog();
        let overrides = OverrideTable::new();
        let detector = Detector::new(&catalog, &overrides);
        let sources: Vec<_> = ["Charizard Bust", "Unknown", "Eevee"]
            .iter()
            .map(|name| ProjectSource::from_name(name))
            .collect();

        let primaries: Vec<String> = detector
            .detect_all(&sources)
            .iter()
            .map(|d| d.primary().to_string())
            .collect();
        assert_eq!(primaries, vec!["Charizard", UNMAPPED_LABEL, "Eevee"]);
    }
}
