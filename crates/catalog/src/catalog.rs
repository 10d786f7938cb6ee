use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::alias::{load_aliases, AliasRow};
use crate::corpus::{tokenize_corpus, CompoundTable};
use crate::display::{display_name, title_case};
use crate::error::{CatalogError, Result};
use crate::normalize::normalize;

/// Fewer distinct corpus entries than this means the corpus is truncated or
/// malformed.
pub const MIN_DISTINCT_ENTRIES: usize = 900;

/// One recognized vocabulary item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Normalized matching key
    pub key: String,

    /// Human-readable name, used as the output label
    pub display: String,
}

impl CatalogEntry {
    pub fn new(key: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display: display.into(),
        }
    }
}

/// Ordered, key-unique vocabulary. Immutable once built.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build from raw entries, keeping the first entry for each key.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.key.clone()))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.entries.iter()
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds a [`Catalog`] from a corpus and alias rows.
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    compounds: CompoundTable,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new(CompoundTable::builtin())
    }
}

impl CatalogBuilder {
    pub fn new(compounds: CompoundTable) -> Self {
        Self { compounds }
    }

    /// Parse the corpus, enforce the minimum size, then append aliases.
    pub fn build(&self, corpus: &str, aliases: &[AliasRow]) -> Result<Catalog> {
        let tokens = tokenize_corpus(corpus, &self.compounds);
        if tokens.is_empty() {
            return Err(CatalogError::EmptyCorpus);
        }

        let mut seen = HashSet::new();
        let distinct: Vec<String> = tokens
            .into_iter()
            .filter(|entry| seen.insert(entry.clone()))
            .collect();

        if distinct.len() < MIN_DISTINCT_ENTRIES {
            return Err(CatalogError::CorpusTooSmall {
                found: distinct.len(),
                minimum: MIN_DISTINCT_ENTRIES,
            });
        }
        log::info!("Parsed {} distinct corpus entries", distinct.len());

        let corpus_entries = distinct
            .iter()
            .map(|entry| CatalogEntry::new(normalize(entry), display_name(entry)));

        let alias_entries = aliases.iter().filter_map(|row| {
            let key = normalize(&row.alternate);
            if key.is_empty() {
                log::warn!("Alias {:?} normalizes to nothing, skipped", row.alternate);
                return None;
            }
            let display = row
                .canonical
                .clone()
                .unwrap_or_else(|| title_case(&key));
            Some(CatalogEntry::new(key, display))
        });

        let catalog = Catalog::from_entries(corpus_entries.chain(alias_entries));
        log::info!(
            "Catalog ready: {} entries ({} alias rows considered)",
            catalog.len(),
            aliases.len()
        );
        Ok(catalog)
    }

    /// Read the corpus and optional alias file, then [`build`](Self::build).
    pub fn build_from_files(&self, corpus: &Path, aliases: Option<&Path>) -> Result<Catalog> {
        let text = fs::read_to_string(corpus).map_err(|err| CatalogError::io(corpus, err))?;
        let rows = match aliases {
            Some(path) => load_aliases(path)?,
            None => Vec::new(),
        };
        self.build(&text, &rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn synthetic_corpus(extra: &str) -> String {
        let mut words: Vec<String> = (0..MIN_DISTINCT_ENTRIES)
            .map(|i| format!("species{i}"))
            .collect();
        words.push(extra.to_string());
        words.join(" ")
    }

    #[test]
    fn keys_are_unique() {
        let corpus = synthetic_corpus("pikachu pikachu mr mime mr mime");
        let aliases = vec![
            AliasRow {
                alternate: "Pikachu".to_string(),
                canonical: Some("Pika".to_string()),
            },
            AliasRow {
                alternate: "zard".to_string(),
                canonical: Some("Charizard".to_string()),
            },
        ];
        let catalog = CatalogBuilder::default().build(&corpus, &aliases).unwrap();

        let mut keys = HashSet::new();
        assert!(catalog.iter().all(|entry| keys.insert(entry.key.clone())));
        assert_eq!(catalog.len(), MIN_DISTINCT_ENTRIES + 3);
    }

    #[test]
    fn corpus_entries_win_over_aliases() {
        let corpus = synthetic_corpus("pikachu");
        let aliases = vec![AliasRow {
            alternate: "PIKACHU".to_string(),
            canonical: Some("Not Pikachu".to_string()),
        }];
        let catalog = CatalogBuilder::default().build(&corpus, &aliases).unwrap();
        assert_eq!(catalog.get("pikachu").unwrap().display, "Pikachu");
    }

    #[test]
    fn alias_without_canonical_is_title_cased() {
        let corpus = synthetic_corpus("pikachu");
        let aliases = vec![AliasRow {
            alternate: "Pikachu-Libre".to_string(),
            canonical: None,
        }];
        let catalog = CatalogBuilder::default().build(&corpus, &aliases).unwrap();
        assert_eq!(
            catalog.get("pikachu libre"),
            Some(&CatalogEntry::new("pikachu libre", "Pikachu Libre"))
        );
    }

    #[test]
    fn compound_entries_get_display_exceptions() {
        let corpus = synthetic_corpus("mr mime ho oh iron valiant");
        let catalog = CatalogBuilder::default().build(&corpus, &[]).unwrap();
        assert_eq!(catalog.get("mr mime").unwrap().display, "Mr. Mime");
        assert_eq!(catalog.get("ho oh").unwrap().display, "Ho-Oh");
        assert_eq!(catalog.get("iron valiant").unwrap().display, "Iron Valiant");
        assert!(catalog.get("iron").is_none());
    }

    #[test]
    fn small_corpus_is_fatal() {
        let corpus = "pikachu eevee pikachu charizard";
        let err = CatalogBuilder::default().build(corpus, &[]).unwrap_err();
        match err {
            CatalogError::CorpusTooSmall { found, minimum } => {
                assert_eq!(found, 3);
                assert_eq!(minimum, MIN_DISTINCT_ENTRIES);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicates_do_not_count_toward_threshold() {
        let corpus = vec!["pikachu"; MIN_DISTINCT_ENTRIES * 2].join(" ");
        assert!(matches!(
            CatalogBuilder::default().build(&corpus, &[]),
            Err(CatalogError::CorpusTooSmall { found: 1, .. })
        ));
    }

    #[test]
    fn empty_corpus_is_fatal() {
        assert!(matches!(
            CatalogBuilder::default().build("  \n ", &[]),
            Err(CatalogError::EmptyCorpus)
        ));
    }

    #[test]
    fn builds_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let corpus_path = dir.path().join("species.txt");
        let alias_path = dir.path().join("aliases.tsv");
        fs::write(&corpus_path, synthetic_corpus("eevee")).unwrap();
        fs::write(&alias_path, "# comments\nvee\tEevee\n").unwrap();

        let catalog = CatalogBuilder::default()
            .build_from_files(&corpus_path, Some(&alias_path))
            .unwrap();
        assert_eq!(catalog.get("vee").unwrap().display, "Eevee");
    }

    #[test]
    fn missing_corpus_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = CatalogBuilder::default()
            .build_from_files(&dir.path().join("nope.txt"), None)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("nope.txt"));
    }
}
