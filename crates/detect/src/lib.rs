//! # Dexsort Detect
//!
//! Finds which catalog entries a project folder mentions.
//!
//! ## Algorithm
//!
//! ```text
//! ProjectSource (name + nested names)
//!     │
//!     ├──> Override table (exact raw name) ──> literal labels
//!     │
//!     ├──> Haystack: " " + normalize(all names) + " "
//!     │
//!     ├──> Candidates: entries whose " key " occurs in the haystack
//!     │
//!     ├──> Suppress keys contained (whole-word) in a longer candidate key
//!     │
//!     └──> Dedup by display, sort case-insensitively ──> primary = first
//! ```
//!
//! Projects with no match land in the `_Unmapped` bucket.

mod detector;
mod overrides;
mod source;

pub use detector::{Detection, DetectionOrigin, Detector, UNMAPPED_LABEL};
pub use overrides::OverrideTable;
pub use source::{ModelExtensions, ProjectSource, ProjectSourceBuilder};
