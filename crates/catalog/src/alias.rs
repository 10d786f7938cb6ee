use std::fs;
use std::path::Path;

use crate::error::{CatalogError, Result};

/// One row of the manual alias table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRow {
    /// Alternate spelling as written in the file
    pub alternate: String,

    /// Canonical display name; `None` derives one from the alternate spelling
    pub canonical: Option<String>,
}

/// Parse tab-separated `alternate \t canonical` lines.
///
/// Blank lines and lines starting with `#` are skipped. The canonical column is
/// optional; an empty one is treated as missing.
pub fn parse_aliases(text: &str) -> Vec<AliasRow> {
    text.lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .filter_map(|line| {
            let mut columns = line.splitn(2, '\t');
            let alternate = columns.next().unwrap_or_default().trim();
            if alternate.is_empty() {
                log::warn!("Skipping alias row without alternate spelling: {line:?}");
                return None;
            }
            let canonical = columns
                .next()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string);
            Some(AliasRow {
                alternate: alternate.to_string(),
                canonical,
            })
        })
        .collect()
}

/// Read and parse an alias file.
pub fn load_aliases(path: &Path) -> Result<Vec<AliasRow>> {
    let text = fs::read_to_string(path).map_err(|err| CatalogError::io(path, err))?;
    let rows = parse_aliases(&text);
    log::debug!("Loaded {} alias rows from {}", rows.len(), path.display());
    Ok(rows)
}
