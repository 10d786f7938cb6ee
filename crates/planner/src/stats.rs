use std::collections::BTreeMap;

use dexsort_detect::{Detection, DetectionOrigin};
use serde::{Deserialize, Serialize};

use crate::planner::PlacementRecord;

/// Statistics about a planning run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Number of projects planned
    pub projects: usize,

    /// Projects classified by catalog matching
    pub detected: usize,

    /// Projects classified by the override table
    pub overridden: usize,

    /// Projects routed to the catch-all bucket
    pub unmapped: usize,

    /// Projects with at least one secondary label
    pub multi_label: usize,

    /// Projects whose folder name needed a variant suffix
    pub variants: usize,

    /// Secondary pointer paths planned
    pub secondary_paths: usize,

    /// Destination paths present before planning
    pub seeded_paths: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,

    /// Canonical placements per primary label
    pub primary_labels: BTreeMap<String, usize>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, detection: &Detection, record: &PlacementRecord) {
        self.projects += 1;
        match detection.origin {
            DetectionOrigin::Detected => self.detected += 1,
            DetectionOrigin::Override => self.overridden += 1,
            DetectionOrigin::Unmapped => self.unmapped += 1,
        }
        if !record.secondary_paths.is_empty() {
            self.multi_label += 1;
        }
        if record.variant_number.is_some() {
            self.variants += 1;
        }
        self.secondary_paths += record.secondary_paths.len();
        *self
            .primary_labels
            .entry(detection.primary().to_string())
            .or_insert(0) += 1;
    }
}
