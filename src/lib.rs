//! folio: front-matter resolver and build tool for Markdown blogs
//!
//! Every content file is parsed into a [`content::ContentRecord`]
//! (front matter plus Markdown body), validated against the required fields
//! for its layout, and resolved into a page record that an external
//! templating engine can render. Bad files are skipped and reported; they
//! never stop the build.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

/// A site on disk: its configuration and resolved directories
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory (holds `_config.yml`)
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Destination (output) directory
    pub destination_dir: PathBuf,
}

impl Site {
    /// Open the site rooted at `base_dir`, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Build a site from an already-loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let source_dir = match config.source.trim() {
            "" | "." => base_dir.clone(),
            source => base_dir.join(source),
        };
        let destination_dir = base_dir.join(&config.destination);

        Self {
            config,
            base_dir,
            source_dir,
            destination_dir,
        }
    }

    /// Parse, validate and resolve all content, emitting pages to the
    /// destination directory
    pub fn build(&self) -> anyhow::Result<generator::BuildReport> {
        commands::generate::run(self)
    }

    /// Parse and validate all content without writing anything
    pub fn check(&self) -> anyhow::Result<generator::BuildReport> {
        commands::check::run(self)
    }

    /// Clean the destination directory
    pub fn clean(&self) -> anyhow::Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post, page or draft
    pub fn new_post(&self, title: &str, kind: content::ContentKind) -> anyhow::Result<PathBuf> {
        commands::new::create(self, title, kind)
    }
}
