//! # Dexsort Catalog
//!
//! Controlled vocabulary for classifying project folders by species.
//!
//! ## Pipeline
//!
//! ```text
//! Corpus text                Alias rows (TSV)
//!     │                          │
//!     ├──> normalize()           ├──> normalize(alternate) → key
//!     │                          │
//!     ├──> Lookahead tokenizer   └──> display given or title-cased
//!     │      └─ two-word compounds
//!     │
//!     ├──> First-seen dedup + minimum size check
//!     │
//!     └──> Catalog (key-unique, corpus entries before aliases)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use dexsort_catalog::{normalize, Catalog, CatalogEntry};
//!
//! let catalog = Catalog::from_entries(vec![
//!     CatalogEntry::new("pikachu", "Pikachu"),
//!     CatalogEntry::new("mr mime", "Mr. Mime"),
//! ]);
//!
//! assert_eq!(normalize("Mr. Mime  (Galar)"), "mr mime galar");
//! assert!(catalog.get("mr mime").is_some());
//! ```

mod alias;
mod catalog;
mod corpus;
mod display;
mod error;
mod normalize;

pub use alias::{load_aliases, parse_aliases, AliasRow};
pub use catalog::{Catalog, CatalogBuilder, CatalogEntry, MIN_DISTINCT_ENTRIES};
pub use corpus::{tokenize_corpus, CompoundTable};
pub use display::{display_name, title_case};
pub use error::{CatalogError, Result};
pub use normalize::normalize;
