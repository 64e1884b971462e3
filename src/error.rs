//! Error types for the folio library

use std::path::PathBuf;

use thiserror::Error;

use crate::content::FrontMatterError;

/// Result type alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The file's front-matter block could not be decoded. The file is
    /// skipped for this build.
    #[error("malformed front-matter in {path}: {source}")]
    MalformedFrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid site configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unknown timezone `{0}`")]
    Timezone(String),

    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("page path `{0}` would be written outside the destination directory")]
    UnsafeOutputPath(String),
}

impl Error {
    /// Source file this error is about, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Error::MalformedFrontMatter { path, .. }
            | Error::Read { path, .. }
            | Error::Config { path, .. } => Some(path),
            _ => None,
        }
    }
}
