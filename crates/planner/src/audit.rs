use std::collections::HashMap;

use crate::error::{PlannerError, Result};
use crate::index::DestinationIndex;
use crate::planner::PlacementRecord;

/// Run-level check over every emitted record.
///
/// Fails on the first path that two sources share, or that was already present
/// in the output tree. Neither can happen when every placement went through the
/// same index; a failure means nothing from this run may be applied.
pub fn audit_records<I: DestinationIndex>(records: &[PlacementRecord], index: &I) -> Result<()> {
    let mut owners: HashMap<&str, &str> = HashMap::new();

    for record in records {
        for path in record.paths() {
            if index.is_preexisting(path) {
                return Err(PlannerError::CollidesWithExisting {
                    path: path.to_string(),
                    source_id: record.source_id.clone(),
                });
            }
            if let Some(first) = owners.insert(path, &record.source_id) {
                return Err(PlannerError::DuplicatePath {
                    path: path.to_string(),
                    first: first.to_string(),
                    second: record.source_id.clone(),
                });
            }
        }
    }

    log::info!(
        "Audit passed: {} paths across {} records",
        owners.len(),
        records.len()
    );
    Ok(())
}
