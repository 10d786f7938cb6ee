//! # Dexsort Planner
//!
//! Collision-free placement of classified projects.
//!
//! ## Run
//!
//! ```text
//! ProjectSource[] (sorted by source_id)
//!     │
//!     ├──> Detector (parallel, order preserving)
//!     │
//!     ├──> PlacementPlanner (strictly sequential)
//!     │      ├─ canonical = primary/<folder>
//!     │      ├─ links     = secondary/<folder>
//!     │      └─ any collision → "<base> (Variant N)" for all targets at once
//!     │
//!     ├──> DestinationIndex (seeded from disk, grows with every record)
//!     │
//!     ├──> Audit (no path emitted twice, none pre-existing)
//!     │
//!     └──> Manifest rows (CSV / JSON)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use dexsort_detect::{Detection, DetectionOrigin, ProjectSource};
//! use dexsort_planner::{PathIndex, PlacementPlanner};
//!
//! let mut index = PathIndex::seeded(["Pikachu/January 2026 - Pikachu Statue".to_string()]);
//! let detection = Detection {
//!     labels: vec!["Pikachu".to_string()],
//!     origin: DetectionOrigin::Detected,
//! };
//! let source = ProjectSource::from_name("Pikachu Statue");
//!
//! let record = PlacementPlanner::new(&mut index).place(
//!     &source,
//!     &detection,
//!     "January 2026 - Pikachu Statue",
//! );
//! assert_eq!(record.canonical_path, "Pikachu/January 2026 - Pikachu Statue (Variant 2)");
//! ```

mod audit;
mod error;
mod folder;
mod index;
mod manifest;
mod planner;
mod run;
mod stats;

pub use audit::audit_records;
pub use error::{PlannerError, Result};
pub use folder::base_folder_name;
pub use index::{DestinationIndex, PathIndex};
pub use manifest::{write_manifest, ManifestFormat, ManifestRow, PlacementStatus};
pub use planner::{PlacementPlanner, PlacementRecord};
pub use run::{plan_run, PlannedProject, RunPlan};
pub use stats::RunStats;
