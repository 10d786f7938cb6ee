use std::fs;
use std::path::Path;

use dexsort_detect::{Detection, DetectionOrigin, ProjectSource};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::planner::PlacementRecord;

const CSV_HEADER: [&str; 6] = [
    "source_project",
    "detected_labels_csv",
    "primary_label",
    "canonical_dest",
    "secondary_dests_csv",
    "status",
];

/// How a row's destination was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStatus {
    Placed,
    Override,
    Unmapped,
}

impl PlacementStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Placed => "placed",
            Self::Override => "override",
            Self::Unmapped => "unmapped",
        }
    }
}

impl From<DetectionOrigin> for PlacementStatus {
    fn from(origin: DetectionOrigin) -> Self {
        match origin {
            DetectionOrigin::Detected => Self::Placed,
            DetectionOrigin::Override => Self::Override,
            DetectionOrigin::Unmapped => Self::Unmapped,
        }
    }
}

/// One manifest line, consumed by the mover and pointer tooling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRow {
    pub source_project: String,
    pub detected_labels_csv: String,
    pub primary_label: String,
    pub canonical_dest: String,
    pub secondary_dests_csv: String,
    pub status: PlacementStatus,
}

impl ManifestRow {
    pub fn new(source: &ProjectSource, detection: &Detection, record: &PlacementRecord) -> Self {
        Self {
            source_project: source.source_id.clone(),
            detected_labels_csv: detection.labels.join(","),
            primary_label: detection.primary().to_string(),
            canonical_dest: record.canonical_path.clone(),
            secondary_dests_csv: record.secondary_paths.join(","),
            status: detection.origin.into(),
        }
    }

    fn fields(&self) -> [&str; 6] {
        [
            self.source_project.as_str(),
            self.detected_labels_csv.as_str(),
            self.primary_label.as_str(),
            self.canonical_dest.as_str(),
            self.secondary_dests_csv.as_str(),
            self.status.as_str(),
        ]
    }
}

/// On-disk manifest encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Csv,
    Json,
}

impl ManifestFormat {
    /// `.json` selects JSON; anything else is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }

    pub fn render(self, rows: &[ManifestRow]) -> Result<String> {
        match self {
            Self::Csv => Ok(render_csv(rows)),
            Self::Json => Ok(serde_json::to_string_pretty(rows)?),
        }
    }
}

/// Write `rows` to `path` in `format`.
pub fn write_manifest(path: &Path, rows: &[ManifestRow], format: ManifestFormat) -> Result<()> {
    let body = format.render(rows)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PlannerError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, body).map_err(|source| PlannerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Wrote {} manifest rows to {}", rows.len(), path.display());
    Ok(())
}

fn render_csv(rows: &[ManifestRow]) -> String {
    let mut out = String::new();
    push_line(&mut out, CSV_HEADER);
    for row in rows {
        push_line(&mut out, row.fields());
    }
    out
}

fn push_line(out: &mut String, fields: [&str; 6]) {
    let line: Vec<String> = fields.iter().map(|field| quote(field)).collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
