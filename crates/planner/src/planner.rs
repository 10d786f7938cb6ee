use std::collections::HashSet;

use dexsort_detect::{Detection, ProjectSource};
use serde::Serialize;

use crate::index::DestinationIndex;

/// Final destinations for one project. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementRecord {
    pub source_id: String,
    pub canonical_path: String,
    pub secondary_paths: Vec<String>,
    pub resolved_folder_name: String,
    /// `None` when the base folder name was free
    pub variant_number: Option<u32>,
}

impl PlacementRecord {
    /// Canonical path followed by every secondary path.
    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.canonical_path.as_str())
            .chain(self.secondary_paths.iter().map(String::as_str))
    }
}

/// Assigns destinations against a shared [`DestinationIndex`].
pub struct PlacementPlanner<'a, I: DestinationIndex> {
    index: &'a mut I,
}

impl<'a, I: DestinationIndex> PlacementPlanner<'a, I> {
    pub fn new(index: &'a mut I) -> Self {
        Self { index }
    }

    /// Place one project and reserve its paths.
    ///
    /// On any collision the whole folder name gets a `(Variant N)` suffix and
    /// every target is checked again, so canonical and secondary paths always
    /// share one folder name.
    pub fn place(
        &mut self,
        source: &ProjectSource,
        detection: &Detection,
        base_folder: &str,
    ) -> PlacementRecord {
        let primary = detection.primary();
        let mut seen = HashSet::from([primary]);
        let secondaries: Vec<&str> = detection
            .secondaries()
            .iter()
            .map(String::as_str)
            .filter(|label| seen.insert(*label))
            .collect();

        let mut folder = base_folder.to_string();
        let mut variant_number = None;
        let mut next_variant: u32 = 2;

        loop {
            let canonical = join(primary, &folder);
            let links: Vec<String> = secondaries.iter().map(|s| join(s, &folder)).collect();

            let mut targets = Vec::with_capacity(links.len() + 1);
            targets.push(canonical.clone());
            targets.extend(links.iter().cloned());

            if self.index.try_reserve(&targets) {
                log::debug!(
                    "{} -> {} (+{} links)",
                    source.source_id,
                    canonical,
                    links.len()
                );
                return PlacementRecord {
                    source_id: source.source_id.clone(),
                    canonical_path: canonical,
                    secondary_paths: links,
                    resolved_folder_name: folder,
                    variant_number,
                };
            }

            log::debug!(
                "{}: {:?} collides, trying variant {}",
                source.source_id,
                folder,
                next_variant
            );
            folder = format!("{base_folder} (Variant {next_variant})");
            variant_number = Some(next_variant);
            next_variant += 1;
        }
    }
}

fn join(label: &str, folder: &str) -> String {
    format!("{label}/{folder}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::PathIndex;
    use dexsort_detect::DetectionOrigin;
    use pretty_assertions::assert_eq;

    fn detection(labels: &[&str]) -> Detection {
        Detection {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            origin: DetectionOrigin::Detected,
        }
    }

    #[test]
    fn free_name_is_used_as_is() {
        let mut index = PathIndex::new();
        let record = PlacementPlanner::new(&mut index).place(
            &ProjectSource::from_name("Eevee Pikachu Diorama"),
            &detection(&["Eevee", "Pikachu"]),
            "January 2026 - Eevee Pikachu Diorama",
        );
        assert_eq!(record.canonical_path, "Eevee/January 2026 - Eevee Pikachu Diorama");
        assert_eq!(
            record.secondary_paths,
            vec!["Pikachu/January 2026 - Eevee Pikachu Diorama"]
        );
        assert_eq!(record.variant_number, None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn collisions_bump_variant_numbers() {
        let base = "January 2026 - Pikachu Statue";
        let mut index = PathIndex::seeded([format!("Pikachu/{base}")]);
        let source = ProjectSource::from_name("Pikachu Statue");
        let labels = detection(&["Pikachu"]);

        let second = PlacementPlanner::new(&mut index).place(&source, &labels, base);
        assert_eq!(second.canonical_path, format!("Pikachu/{base} (Variant 2)"));
        assert_eq!(second.variant_number, Some(2));

        let third = PlacementPlanner::new(&mut index).place(&source, &labels, base);
        assert_eq!(third.canonical_path, format!("Pikachu/{base} (Variant 3)"));
        assert_eq!(third.resolved_folder_name, format!("{base} (Variant 3)"));
        assert_eq!(third.variant_number, Some(3));
    }

    #[test]
    fn secondary_collision_renames_every_target() {
        let base = "March - Duo";
        let mut index = PathIndex::seeded([format!("Pikachu/{base}")]);
        let record = PlacementPlanner::new(&mut index).place(
            &ProjectSource::from_name("Duo"),
            &detection(&["Eevee", "Pikachu"]),
            base,
        );

        assert_eq!(record.canonical_path, "Eevee/March - Duo (Variant 2)");
        assert_eq!(record.secondary_paths, vec!["Pikachu/March - Duo (Variant 2)"]);
        assert!(!index.contains("Eevee/March - Duo"));
    }

    #[test]
    fn repeated_labels_do_not_self_collide() {
        let mut index = PathIndex::new();
        let record = PlacementPlanner::new(&mut index).place(
            &ProjectSource::from_name("Pika"),
            &detection(&["Pikachu", "Pikachu", "Eevee", "Eevee"]),
            "Pika",
        );
        assert_eq!(record.canonical_path, "Pikachu/Pika");
        assert_eq!(record.secondary_paths, vec!["Eevee/Pika"]);
    }

    #[test]
    fn paths_lists_canonical_first() {
        let record = PlacementRecord {
            source_id: "x".to_string(),
            canonical_path: "A/x".to_string(),
            secondary_paths: vec!["B/x".to_string(), "C/x".to_string()],
            resolved_folder_name: "x".to_string(),
            variant_number: None,
        };
        assert_eq!(record.paths().collect::<Vec<_>>(), vec!["A/x", "B/x", "C/x"]);
    }
}
