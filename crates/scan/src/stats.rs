use serde::{Deserialize, Serialize};

/// Statistics about an input scan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    /// Project folders discovered
    pub projects: usize,

    /// Nested directories whose names were collected
    pub directories: usize,

    /// Model files whose base names were collected
    pub model_files: usize,

    /// Files ignored for not having a model extension
    pub skipped_files: usize,

    /// Entries that could not be read
    pub errors: Vec<String>,
}

impl ScanStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }
}
