use std::fs;
use std::path::{Path, PathBuf};

use dexsort_detect::{ModelExtensions, ProjectSource, ProjectSourceBuilder};
use ignore::WalkBuilder;

use crate::error::{Result, ScanError};
use crate::stats::ScanStats;

/// Discovers project folders under an input root
pub struct ProjectScanner {
    root: PathBuf,
    extensions: ModelExtensions,
}

impl ProjectScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extensions: ModelExtensions::default(),
        }
    }

    #[must_use]
    pub fn with_extensions(mut self, extensions: ModelExtensions) -> Self {
        self.extensions = extensions;
        self
    }

    /// One [`ProjectSource`] per visible child directory, sorted by `source_id`.
    pub fn scan(&self) -> Result<(Vec<ProjectSource>, ScanStats)> {
        if !self.root.is_dir() {
            return Err(ScanError::InvalidRoot(self.root.display().to_string()));
        }

        let read = fs::read_dir(&self.root).map_err(|source| ScanError::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut stats = ScanStats::new();
        let mut project_dirs = Vec::new();
        for entry in read {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Failed to read entry under {}: {e}", self.root.display());
                    stats.add_error(e.to_string());
                    continue;
                }
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_hidden(&name) {
                continue;
            }
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                project_dirs.push((name, entry.path()));
            }
        }
        project_dirs.sort_by(|a, b| a.0.cmp(&b.0));

        let sources: Vec<ProjectSource> = project_dirs
            .into_iter()
            .map(|(name, path)| self.collect_project(&name, &path, &mut stats))
            .collect();
        stats.projects = sources.len();

        log::info!(
            "Found {} projects under {} ({} model files)",
            stats.projects,
            self.root.display(),
            stats.model_files
        );
        Ok((sources, stats))
    }

    fn collect_project(&self, name: &str, dir: &Path, stats: &mut ScanStats) -> ProjectSource {
        let mut builder = ProjectSourceBuilder::new(name, name).extensions(self.extensions.clone());

        let mut walker = WalkBuilder::new(dir);
        walker
            .standard_filters(false)
            .hidden(true) // dotfiles and dot-dirs never describe a model
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b));

        for result in walker.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Failed to read entry in {}: {e}", dir.display());
                    stats.add_error(e.to_string());
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }
            let Some(file_type) = entry.file_type() else {
                continue;
            };
            let entry_name = entry.file_name().to_string_lossy();

            if file_type.is_dir() {
                builder.add_dir(&entry_name);
                stats.directories += 1;
            } else if file_type.is_file() {
                if builder.add_file(&entry_name) {
                    stats.model_files += 1;
                } else {
                    log::debug!("Skipping non-model file {}", entry.path().display());
                    stats.skipped_files += 1;
                }
            }
        }

        builder.build()
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn each_child_dir_is_a_project() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("Pikachu Statue").join("Parts")).unwrap();
        fs::write(root.join("Pikachu Statue").join("Parts").join("Eevee_Tail.STL"), b"solid").unwrap();
        fs::write(root.join("Pikachu Statue").join("Charizard notes.txt"), b"").unwrap();
        fs::create_dir_all(root.join("Charizard Bust")).unwrap();
        fs::create_dir_all(root.join(".trash")).unwrap();
        fs::write(root.join("loose.stl"), b"").unwrap();

        let (sources, stats) = ProjectScanner::new(root).scan().unwrap();

        let ids: Vec<&str> = sources.iter().map(|s| s.source_id.as_str()).collect();
        assert_eq!(ids, vec!["Charizard Bust", "Pikachu Statue"]);
        assert_eq!(sources[1].text, "pikachu statue parts eevee tail");
        assert_eq!(stats.projects, 2);
        assert_eq!(stats.model_files, 1);
        assert_eq!(stats.skipped_files, 1);
        assert_eq!(stats.directories, 1);
    }

    #[test]
    fn hidden_nested_entries_are_skipped() {
        let temp = tempdir().unwrap();
        let project = temp.path().join("Eevee");
        fs::create_dir_all(project.join(".cache").join("Pikachu")).unwrap();
        fs::write(project.join(".Charizard.stl"), b"").unwrap();

        let (sources, _) = ProjectScanner::new(temp.path()).scan().unwrap();
        assert_eq!(sources[0].text, "eevee");
    }

    #[test]
    fn custom_extensions_are_honored() {
        let temp = tempdir().unwrap();
        let project = temp.path().join("Box");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("Pikachu.gcode"), b"").unwrap();
        fs::write(project.join("Eevee.stl"), b"").unwrap();

        let (sources, _) = ProjectScanner::new(temp.path())
            .with_extensions(ModelExtensions::new(["gcode"]))
            .scan()
            .unwrap();
        assert_eq!(sources[0].text, "box pikachu");
    }

    #[test]
    fn missing_root_is_an_error() {
        let temp = tempdir().unwrap();
        let err = ProjectScanner::new(temp.path().join("absent")).scan().unwrap_err();
        assert!(matches!(err, ScanError::InvalidRoot(_)));
    }
}
