//! # Dexsort Scan
//!
//! Filesystem side of a run: what projects exist and which destinations are
//! already taken.
//!
//! ## Pipeline
//!
//! ```text
//! Input root                          Output root
//!     │                                   │
//!     ├──> one project per child dir      └──> every <label>/<folder> entry
//!     │      ├─ nested dir names                 └─> pre-seeded destinations
//!     │      └─ model file stems
//!     │
//!     └──> ProjectSource[] sorted by source_id
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use dexsort_scan::{seed_destinations, ProjectScanner};
//!
//! fn main() -> dexsort_scan::Result<()> {
//!     let (sources, stats) = ProjectScanner::new("/prints/incoming").scan()?;
//!     let existing = seed_destinations("/prints/library")?;
//!
//!     println!("{} projects, {} existing destinations", stats.projects, existing.len());
//!     Ok(())
//! }
//! ```

mod error;
mod scanner;
mod seed;
mod stats;

pub use error::{Result, ScanError};
pub use scanner::ProjectScanner;
pub use seed::seed_destinations;
pub use stats::ScanStats;
