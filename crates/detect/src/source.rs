use std::collections::HashSet;
use std::path::Path;

use dexsort_catalog::normalize;
use serde::Serialize;

const DEFAULT_MODEL_EXTENSIONS: &[&str] = &[
    "stl", "obj", "3mf", "ply", "step", "stp", "fbx", "blend", "ztl", "lys", "chitubox", "ctb",
];

/// File extensions whose base names contribute to a project's text.
#[derive(Debug, Clone)]
pub struct ModelExtensions {
    extensions: HashSet<String>,
}

impl Default for ModelExtensions {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_EXTENSIONS.iter().copied())
    }
}

impl ModelExtensions {
    /// Extensions are compared case-insensitively, with or without a leading dot.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
        }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_lowercase()))
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

/// Immutable description of one input project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSource {
    /// Stable identifier, also the deterministic processing order
    pub source_id: String,

    /// Folder name as found on disk
    pub raw_name: String,

    /// Normalized text of the name and every contributing nested name
    pub text: String,
}

impl ProjectSource {
    /// Source whose only text is its own name.
    pub fn from_name(name: &str) -> Self {
        ProjectSourceBuilder::new(name, name).build()
    }

    /// Whole-word searchable form of [`text`](Self::text).
    pub fn haystack(&self) -> String {
        format!(" {} ", self.text)
    }
}

/// Collects a project's nested entries before freezing it into a [`ProjectSource`].
#[derive(Debug, Clone)]
pub struct ProjectSourceBuilder {
    source_id: String,
    raw_name: String,
    names: Vec<String>,
    extensions: ModelExtensions,
}

impl ProjectSourceBuilder {
    pub fn new(source_id: impl Into<String>, raw_name: impl Into<String>) -> Self {
        let raw_name = raw_name.into();
        Self {
            source_id: source_id.into(),
            names: vec![raw_name.clone()],
            raw_name,
            extensions: ModelExtensions::default(),
        }
    }

    #[must_use]
    pub fn extensions(mut self, extensions: ModelExtensions) -> Self {
        self.extensions = extensions;
        self
    }

    /// Nested directory names always count.
    pub fn add_dir(&mut self, name: &str) {
        self.names.push(name.to_string());
    }

    /// Nested files count by base name, and only for model extensions.
    pub fn add_file(&mut self, file_name: &str) -> bool {
        if !self.extensions.matches(file_name) {
            return false;
        }
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(file_name);
        self.names.push(stem.to_string());
        true
    }

    pub fn build(self) -> ProjectSource {
        ProjectSource {
            source_id: self.source_id,
            raw_name: self.raw_name,
            text: normalize(&self.names.join(" ")),
        }
    }
}
