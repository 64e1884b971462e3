//! Content records: one per Markdown file

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::frontmatter::{FrontMatter, FrontMatterFormat};
use super::validate::{self, ValidationResult};
use crate::error::{Error, Result};

/// Where a content file lives, which decides how it is validated and routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A file under `_posts/`
    Post,
    /// A file under `_drafts/`
    Draft,
    /// Any other Markdown file, e.g. `about.md`
    Page,
}

impl ContentKind {
    /// Classify a source path relative to the source directory
    pub fn from_source(path: &Path) -> Self {
        for component in path.components() {
            match component.as_os_str().to_str() {
                Some("_posts") => return Self::Post,
                Some("_drafts") => return Self::Draft,
                _ => {}
            }
        }
        Self::Page
    }

    /// Drafts are posts that have not been published yet
    pub fn is_post(&self) -> bool {
        matches!(self, Self::Post | Self::Draft)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Draft => "draft",
            Self::Page => "page",
        }
    }
}

/// A parsed content file: front matter plus the raw Markdown body.
///
/// Built once per build pass and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct ContentRecord {
    pub front_matter: FrontMatter,
    /// Delimiter flavour the file used, `None` without front matter
    pub format: Option<FrontMatterFormat>,
    pub body: String,
    /// Source file path relative to the source directory
    pub source_path: PathBuf,
    pub kind: ContentKind,
}

impl ContentRecord {
    /// Parse raw file text into a record.
    ///
    /// Fails with [`Error::MalformedFrontMatter`] when the front-matter block
    /// cannot be decoded.
    pub fn parse(raw: &str, source_path: impl Into<PathBuf>) -> Result<Self> {
        let source_path = source_path.into();
        let (format, front_matter, body) =
            FrontMatter::parse(raw).map_err(|source| Error::MalformedFrontMatter {
                path: source_path.clone(),
                source,
            })?;

        Ok(Self {
            front_matter,
            format,
            body: body.to_string(),
            kind: ContentKind::from_source(&source_path),
            source_path,
        })
    }

    /// Check required fields with no site-level layout defaults
    pub fn validate(&self) -> ValidationResult {
        validate::validate(self, None)
    }

    /// File name without extension, e.g. `2020-01-01-hello`
    pub fn file_stem(&self) -> &str {
        self.source_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
    }

    /// Source path with forward slashes, for display and routing
    pub fn source_str(&self) -> String {
        self.source_path.to_string_lossy().replace('\\', "/")
    }
}
