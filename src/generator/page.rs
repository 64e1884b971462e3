//! Resolved page records handed to the templating layer

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::content::{ContentKind, FrontMatter};

/// A content record with everything the templating layer needs resolved:
/// URL, date, rendered body and links to neighbouring posts.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedPage {
    pub kind: ContentKind,
    pub title: String,
    pub layout: Option<String>,
    /// Missing for undated pages; undated posts sort last
    pub date: Option<DateTime<FixedOffset>>,
    /// Root-relative path without `baseurl`, as used for the output file
    pub path: String,
    /// Root-relative URL including `baseurl`, percent-encoded
    pub url: String,
    /// Absolute URL
    pub permalink: String,
    pub slug: String,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    /// Rendered excerpt HTML
    pub excerpt: Option<String>,
    /// Rendered body HTML
    pub content: String,
    pub word_count: usize,
    /// Source file, relative to the source directory
    pub source: String,
    /// All front-matter keys, including ones folio does not interpret
    pub front_matter: FrontMatter,

    /// Older neighbour
    pub previous: Option<PageLink>,
    /// Newer neighbour
    pub next: Option<PageLink>,
    pub related: Vec<PageLink>,
}

impl ResolvedPage {
    pub fn link(&self) -> PageLink {
        PageLink {
            title: self.title.clone(),
            url: self.url.clone(),
            date: self.date,
        }
    }
}

/// Lightweight reference to another page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLink {
    pub title: String,
    pub url: String,
    pub date: Option<DateTime<FixedOffset>>,
}
