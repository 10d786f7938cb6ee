use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use dexsort_detect::{ModelExtensions, OverrideTable};
use serde::Deserialize;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "dexsort.toml";

/// File-level settings; every field can also come from a flag.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Whitespace-separated species corpus
    pub corpus: Option<PathBuf>,

    /// Tab-separated alias table
    pub aliases: Option<PathBuf>,

    /// Folder whose children are the projects to classify
    pub input: Option<PathBuf>,

    /// Library root holding `<label>/<folder>` destinations
    pub output: Option<PathBuf>,

    /// Context prefix for folder names, e.g. "January 2026"
    pub month: Option<String>,

    /// Where the manifest is written (`.json` or CSV)
    pub manifest: Option<PathBuf>,

    /// Extensions whose file names count as project text
    pub model_extensions: Option<Vec<String>>,

    /// Exact project name → labels
    pub overrides: BTreeMap<String, Vec<String>>,
}

impl Config {
    /// Parse a config file; relative paths are resolved against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config: Config = toml::from_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Explicit path must exist; the default file is optional.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(extensions) = &self.model_extensions {
            if ModelExtensions::new(extensions).is_empty() {
                return Err(anyhow!("model_extensions must list at least one extension"));
            }
        }
        for (name, labels) in &self.overrides {
            if labels.iter().all(|label| label.trim().is_empty()) {
                return Err(anyhow!("overrides.{name:?} must list at least one label"));
            }
        }
        Ok(())
    }

    pub fn override_table(&self) -> OverrideTable {
        self.overrides
            .iter()
            .map(|(name, labels)| {
                let labels = labels
                    .iter()
                    .map(|label| label.trim().to_string())
                    .filter(|label| !label.is_empty())
                    .collect();
                (name.clone(), labels)
            })
            .collect()
    }

    pub fn extensions(&self) -> ModelExtensions {
        match &self.model_extensions {
            Some(extensions) => ModelExtensions::new(extensions),
            None => ModelExtensions::default(),
        }
    }

    fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.corpus,
            &mut self.aliases,
            &mut self.input,
            &mut self.output,
            &mut self.manifest,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// First of `flag` or `file`, or an error naming the missing setting.
pub fn require<T: Clone>(flag: Option<T>, file: &Option<T>, key: &str) -> Result<T> {
    flag.or_else(|| file.clone())
        .ok_or_else(|| anyhow!("missing `{key}`: pass --{key} or set it in {DEFAULT_CONFIG_FILE}"))
}
