//! Site configuration (_config.yml)

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::ContentKind;
use crate::error::{Error, Result};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    /// IANA timezone for dates written without an offset; empty means UTC
    pub timezone: String,

    // URL
    pub url: String,
    pub baseurl: String,
    pub permalink: String,

    // Directory
    pub source: String,
    pub destination: String,
    /// Glob patterns, relative to the source directory, never loaded
    pub exclude: Vec<String>,

    // Writing
    pub show_drafts: bool,
    pub excerpt_separator: String,
    /// Layout assumed per content kind (`post`, `page`, `draft`) when the
    /// front matter does not declare one
    pub defaults: HashMap<String, String>,
    pub related_posts: usize,

    /// Treat validation warnings as build failures
    pub strict_front_matter: bool,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let defaults = HashMap::from([
            ("post".to_string(), "post".to_string()),
            ("draft".to_string(), "post".to_string()),
            ("page".to_string(), "page".to_string()),
        ]);

        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            author: String::new(),
            timezone: String::new(),

            url: "http://localhost:4000".to_string(),
            baseurl: String::new(),
            permalink: "/:year/:month/:day/:title/".to_string(),

            source: ".".to_string(),
            destination: "_site".to_string(),
            exclude: Vec::new(),

            show_drafts: false,
            excerpt_separator: "<!-- more -->".to_string(),
            defaults,
            related_posts: 5,

            strict_front_matter: false,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration text. An empty file yields the defaults.
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Timezone used to read dates without an explicit offset
    pub fn tz(&self) -> Result<Tz> {
        if self.timezone.trim().is_empty() {
            return Ok(Tz::UTC);
        }
        self.timezone
            .parse::<Tz>()
            .map_err(|_| Error::Timezone(self.timezone.clone()))
    }

    /// Configured layout for records of `kind` without an explicit layout
    pub fn default_layout(&self, kind: ContentKind) -> Option<&str> {
        self.defaults.get(kind.as_str()).map(String::as_str)
    }
}
