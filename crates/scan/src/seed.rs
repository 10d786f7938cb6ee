use std::path::Path;

use walkdir::WalkDir;

use crate::error::Result;

/// Destination paths already present in the output tree, as `label/folder`.
///
/// Every entry exactly two levels deep counts, whatever its type, so files and
/// pointers left by earlier runs are never overwritten. A missing root means a
/// first run and yields nothing.
pub fn seed_destinations(output_root: impl AsRef<Path>) -> Result<Vec<String>> {
    let root = output_root.as_ref();
    if !root.exists() {
        log::info!("Output root {} does not exist yet", root.display());
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        paths.push(parts.join("/"));
    }

    log::info!("Seeded {} existing destinations from {}", paths.len(), root.display());
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn collects_second_level_entries() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("Pikachu").join("January 2026 - Pikachu Statue").join("deep")).unwrap();
        fs::create_dir_all(root.join("Eevee")).unwrap();
        fs::write(root.join("Eevee").join("January 2026 - Eevee Pikachu Diorama"), b"").unwrap();
        fs::write(root.join("README.txt"), b"").unwrap();

        let paths = seed_destinations(root).unwrap();
        assert_eq!(
            paths,
            vec![
                "Eevee/January 2026 - Eevee Pikachu Diorama",
                "Pikachu/January 2026 - Pikachu Statue",
            ]
        );
    }

    #[test]
    fn missing_root_seeds_nothing() {
        let temp = tempdir().unwrap();
        assert!(seed_destinations(temp.path().join("library")).unwrap().is_empty());
    }
}
