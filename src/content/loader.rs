//! Content loader - reads every Markdown file under the source directory

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::{ContentKind, ContentRecord};
use crate::error::{Error, Result};
use crate::Site;

/// Records that parsed, and the files that could not be read or parsed.
///
/// Failed files are excluded from the build; their errors are reported
/// together once the pass is over.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<ContentRecord>,
    pub errors: Vec<Error>,
}

impl LoadReport {
    pub fn posts(&self) -> impl Iterator<Item = &ContentRecord> {
        self.records.iter().filter(|r| r.kind.is_post())
    }

    pub fn pages(&self) -> impl Iterator<Item = &ContentRecord> {
        self.records.iter().filter(|r| r.kind == ContentKind::Page)
    }
}

/// Loads content from the source directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    exclude: Vec<glob::Pattern>,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Result<Self> {
        let exclude = site
            .config
            .exclude
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { site, exclude })
    }

    /// Load and parse every content file.
    ///
    /// A file that fails never stops the walk.
    pub fn load(&self) -> LoadReport {
        let mut report = LoadReport::default();

        let walker = WalkDir::new(&self.site.source_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_skipped_dir(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown_file(path) {
                continue;
            }

            let relative = self.relative(path);
            if self.is_excluded(&relative) {
                tracing::debug!("Excluded: {}", relative.display());
                continue;
            }

            let kind = ContentKind::from_source(&relative);
            if kind == ContentKind::Draft && !self.site.config.show_drafts {
                continue;
            }

            match self.load_file(path) {
                Ok(record) if !record.front_matter.published() => {
                    tracing::debug!("Unpublished, skipping: {}", relative.display());
                }
                Ok(record) => report.records.push(record),
                Err(e) => report.errors.push(e),
            }
        }

        tracing::debug!(
            "Loaded {} records, {} failed",
            report.records.len(),
            report.errors.len()
        );

        report
    }

    /// Read and parse a single file
    pub fn load_file(&self, path: &Path) -> Result<ContentRecord> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: self.relative(path),
            source,
        })?;
        tracing::debug!("Parsing {}", path.display());
        ContentRecord::parse(&content, self.relative(path))
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.site.source_dir)
            .unwrap_or(path)
            .to_path_buf()
    }

    fn is_excluded(&self, relative: &Path) -> bool {
        self.exclude.iter().any(|p| p.matches_path(relative))
    }

    /// Hidden directories, the output directory and underscore directories
    /// other than `_posts`/`_drafts` hold no content
    fn is_skipped_dir(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        if entry.path() == self.site.destination_dir {
            return true;
        }

        let name = entry.file_name().to_string_lossy();
        if name.starts_with('.') {
            return true;
        }
        name.starts_with('_') && name != "_posts" && name != "_drafts"
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
