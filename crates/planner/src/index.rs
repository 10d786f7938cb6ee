use std::collections::BTreeSet;

/// Run-wide set of claimed destination paths.
///
/// Reads and writes go through the same instance; placement never works from
/// a copy.
pub trait DestinationIndex {
    /// Whether `path` is already claimed, either pre-existing or planned.
    fn contains(&self, path: &str) -> bool;

    /// Claim every path in `paths`, or none of them if any is taken.
    fn try_reserve(&mut self, paths: &[String]) -> bool;

    /// Whether `path` was present before planning started.
    fn is_preexisting(&self, path: &str) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory ordered [`DestinationIndex`].
#[derive(Debug, Clone, Default)]
pub struct PathIndex {
    existing: BTreeSet<String>,
    planned: BTreeSet<String>,
}

impl PathIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index pre-seeded with paths already present in the output tree.
    pub fn seeded(existing: impl IntoIterator<Item = String>) -> Self {
        Self {
            existing: existing.into_iter().collect(),
            planned: BTreeSet::new(),
        }
    }

    pub fn existing_len(&self) -> usize {
        self.existing.len()
    }

    pub fn planned(&self) -> impl Iterator<Item = &str> + '_ {
        self.planned.iter().map(String::as_str)
    }
}

impl DestinationIndex for PathIndex {
    fn contains(&self, path: &str) -> bool {
        self.existing.contains(path) || self.planned.contains(path)
    }

    fn try_reserve(&mut self, paths: &[String]) -> bool {
        let mut batch = BTreeSet::new();
        for path in paths {
            if self.contains(path) || !batch.insert(path.as_str()) {
                return false;
            }
        }
        self.planned.extend(batch.into_iter().map(str::to_string));
        true
    }

    fn is_preexisting(&self, path: &str) -> bool {
        self.existing.contains(path)
    }

    fn len(&self) -> usize {
        self.existing.len() + self.planned.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn reserve_is_all_or_nothing() {
        let mut index = PathIndex::seeded(paths(&["Pikachu/A"]));
        assert!(!index.try_reserve(&paths(&["Eevee/A", "Pikachu/A"])));
        assert!(!index.contains("Eevee/A"));
        assert_eq!(index.len(), 1);

        assert!(index.try_reserve(&paths(&["Eevee/A", "Pikachu/B"])));
        assert!(index.contains("Eevee/A"));
        assert!(index.contains("Pikachu/B"));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn repeated_path_in_one_batch_is_rejected() {
        let mut index = PathIndex::new();
        assert!(!index.try_reserve(&paths(&["Eevee/A", "Eevee/A"])));
        assert!(index.is_empty());
    }

    #[test]
    fn preexisting_is_tracked_separately() {
        let mut index = PathIndex::seeded(paths(&["Pikachu/A"]));
        assert!(index.try_reserve(&paths(&["Pikachu/B"])));
        assert!(index.is_preexisting("Pikachu/A"));
        assert!(!index.is_preexisting("Pikachu/B"));
        assert_eq!(index.existing_len(), 1);
        assert_eq!(index.planned().collect::<Vec<_>>(), vec!["Pikachu/B"]);
    }
}
