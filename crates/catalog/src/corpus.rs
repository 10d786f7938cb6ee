use std::collections::{HashMap, HashSet};

use crate::normalize::normalize;

/// Built-in two-word species names: a head word and the continuations that
/// merge with it.
const BUILTIN_COMPOUNDS: &[(&str, &[&str])] = &[
    ("mr", &["mime", "rime"]),
    ("mime", &["jr"]),
    ("type", &["null"]),
    ("nidoran", &["f", "m"]),
    ("ho", &["oh"]),
    ("porygon", &["z"]),
    ("jangmo", &["o"]),
    ("hakamo", &["o"]),
    ("kommo", &["o"]),
    ("tapu", &["koko", "lele", "bulu", "fini"]),
    ("wo", &["chien"]),
    ("chien", &["pao"]),
    ("ting", &["lu"]),
    ("chi", &["yu"]),
    ("great", &["tusk"]),
    ("scream", &["tail"]),
    ("brute", &["bonnet"]),
    ("flutter", &["mane"]),
    ("slither", &["wing"]),
    ("sandy", &["shocks"]),
    ("roaring", &["moon"]),
    ("walking", &["wake"]),
    ("gouging", &["fire"]),
    ("raging", &["bolt"]),
    (
        "iron",
        &[
            "treads", "bundle", "hands", "jugulis", "moth", "thorns", "valiant", "leaves",
            "boulder", "crown",
        ],
    ),
];

/// Lookahead table of `(word, next_word)` pairs that form one vocabulary entry.
#[derive(Debug, Clone, Default)]
pub struct CompoundTable {
    continuations: HashMap<String, HashSet<String>>,
}

impl CompoundTable {
    /// Empty table: every token stands alone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table preloaded with the known two-word species names.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (head, tails) in BUILTIN_COMPOUNDS {
            for tail in *tails {
                table.insert(head, tail);
            }
        }
        table
    }

    /// Register `head tail` as a compound entry.
    pub fn insert(&mut self, head: &str, tail: &str) {
        self.continuations
            .entry(head.to_string())
            .or_default()
            .insert(tail.to_string());
    }

    #[must_use]
    pub fn with_pair(mut self, head: &str, tail: &str) -> Self {
        self.insert(head, tail);
        self
    }

    /// Merged entry for `word` followed by `next`, if the pair is a compound.
    pub fn merge(&self, word: &str, next: &str) -> Option<String> {
        self.continuations
            .get(word)
            .filter(|tails| tails.contains(next))
            .map(|_| format!("{word} {next}"))
    }

    pub fn len(&self) -> usize {
        self.continuations.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.continuations.is_empty()
    }
}

/// Split a raw corpus into vocabulary entries, in encounter order.
///
/// A token that heads a compound consumes the following token when the pair
/// is in `table`; otherwise it is emitted on its own. Duplicates are kept.
pub fn tokenize_corpus(text: &str, table: &CompoundTable) -> Vec<String> {
    let normalized = normalize(text);
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    let mut entries = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let merged = tokens
            .get(i + 1)
            .and_then(|next| table.merge(tokens[i], next));
        match merged {
            Some(entry) => {
                entries.push(entry);
                i += 2;
            }
            None => {
                entries.push(tokens[i].to_string());
                i += 1;
            }
        }
    }
    entries
}
