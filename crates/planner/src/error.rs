use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Destination {path} planned for both {first} and {second}")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    #[error("Destination {path} planned for {source_id} already exists in the output tree")]
    CollidesWithExisting { path: String, source_id: String },

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
