use std::time::Instant;

use dexsort_detect::{Detection, Detector, ProjectSource};
use serde::Serialize;

use crate::audit::audit_records;
use crate::error::Result;
use crate::folder::base_folder_name;
use crate::index::DestinationIndex;
use crate::manifest::ManifestRow;
use crate::planner::{PlacementPlanner, PlacementRecord};
use crate::stats::RunStats;

/// One project carried through detection and placement
#[derive(Debug, Clone, Serialize)]
pub struct PlannedProject {
    pub source: ProjectSource,
    pub detection: Detection,
    pub record: PlacementRecord,
}

/// Everything a run decided, in processing order
#[derive(Debug, Clone, Serialize)]
pub struct RunPlan {
    pub projects: Vec<PlannedProject>,
    pub stats: RunStats,
}

impl RunPlan {
    pub fn records(&self) -> impl Iterator<Item = &PlacementRecord> + '_ {
        self.projects.iter().map(|p| &p.record)
    }

    pub fn manifest_rows(&self) -> Vec<ManifestRow> {
        self.projects
            .iter()
            .map(|p| ManifestRow::new(&p.source, &p.detection, &p.record))
            .collect()
    }
}

/// Classify and place every source.
///
/// Sources are ordered by `source_id` so variant numbers are reproducible.
/// Detection runs in parallel; placement is sequential against `index`, which
/// holds every path committed so far. The run fails as a whole if the final
/// audit finds a shared or pre-existing path.
pub fn plan_run<I: DestinationIndex>(
    detector: &Detector<'_>,
    mut sources: Vec<ProjectSource>,
    context: &str,
    index: &mut I,
) -> Result<RunPlan> {
    let started = Instant::now();
    let seeded_paths = index.len();

    sources.sort_by(|a, b| a.source_id.cmp(&b.source_id));
    let detections = detector.detect_all(&sources);
    log::info!("Detected labels for {} projects", sources.len());

    let mut stats = RunStats::new();
    stats.seeded_paths = seeded_paths;

    let mut projects = Vec::with_capacity(sources.len());
    {
        let mut planner = PlacementPlanner::new(index);
        for (source, detection) in sources.into_iter().zip(detections) {
            let base = base_folder_name(context, &source.raw_name);
            let record = planner.place(&source, &detection, &base);
            stats.add(&detection, &record);
            projects.push(PlannedProject {
                source,
                detection,
                record,
            });
        }
    }

    let records: Vec<PlacementRecord> = projects.iter().map(|p| p.record.clone()).collect();
    audit_records(&records, &*index)?;

    stats.time_ms = started.elapsed().as_millis() as u64;
    log::info!(
        "Planned {} projects ({} unmapped, {} variants) in {}ms",
        stats.projects,
        stats.unmapped,
        stats.variants,
        stats.time_ms
    );

    Ok(RunPlan { projects, stats })
}
