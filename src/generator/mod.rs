//! Generator module - resolves content records into pages and emits them
//!
//! Resolution runs in two passes. The first resolves each record on its own
//! (dates, URLs, rendered body). The second reads the complete, already
//! resolved collection to sort posts and link neighbours and related posts.

mod page;
mod related;
mod report;
mod sink;

pub use page::{PageLink, ResolvedPage};
pub use related::related_posts;
pub use report::{BuildReport, FileWarning, UrlCollision};
pub use sink::{JsonSink, PageSink};

use chrono_tz::Tz;
use std::collections::HashMap;

use crate::content::{validate, ContentKind, ContentRecord, LoadReport, MarkdownRenderer};
use crate::error::{Error, Result};
use crate::helpers::{
    canonical_page_path, encode_path, expand_permalink, full_url_for, has_dot_segment,
    is_root_relative, page_path_from_source, parse_date, split_dated_stem, start_of_day, url_for,
};
use crate::Site;

/// Resolves records against the site configuration
pub struct Generator<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
    tz: Tz,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(site: &'a Site) -> Result<Self> {
        Ok(Self {
            site,
            renderer: MarkdownRenderer::new(),
            tz: site.config.tz()?,
        })
    }

    /// Validate, resolve and emit everything the loader produced.
    ///
    /// Validation problems and URL collisions are collected into the report;
    /// only a failing sink aborts the pass.
    pub fn generate(&self, loaded: LoadReport, sink: &mut dyn PageSink) -> Result<BuildReport> {
        let mut report = BuildReport {
            skipped: loaded.errors,
            ..BuildReport::default()
        };

        for record in &loaded.records {
            let default_layout = self.site.config.default_layout(record.kind);
            for violation in validate::validate(record, default_layout) {
                report.warnings.push(FileWarning {
                    source: record.source_str(),
                    violation,
                });
            }
        }

        // Keyed by canonical path: `/about` and `/about/` land in one file
        let mut claimed: HashMap<String, String> = HashMap::new();
        for page in self.resolve(&loaded.records) {
            if has_dot_segment(&page.path) {
                report.skipped.push(Error::UnsafeOutputPath(page.path.clone()));
                continue;
            }

            let key = canonical_page_path(&page.path);
            if let Some(kept) = claimed.get(&key) {
                report.collisions.push(UrlCollision {
                    path: key,
                    kept: kept.clone(),
                    dropped: page.source.clone(),
                });
                continue;
            }
            claimed.insert(key, page.source.clone());

            sink.emit(&page)?;
            report.emitted += 1;
        }

        Ok(report)
    }

    /// Resolve all records: posts first (newest to oldest, undated last),
    /// then pages ordered by path
    pub fn resolve(&self, records: &[ContentRecord]) -> Vec<ResolvedPage> {
        let (mut posts, mut pages): (Vec<_>, Vec<_>) = records
            .iter()
            .map(|r| self.resolve_record(r))
            .partition(|p| p.kind.is_post());

        posts.sort_by(|a, b| match (a.date, b.date) {
            (Some(x), Some(y)) => y.cmp(&x).then_with(|| a.source.cmp(&b.source)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.source.cmp(&b.source),
        });
        self.link_posts(&mut posts);

        pages.sort_by(|a, b| a.path.cmp(&b.path));

        posts.extend(pages);
        posts
    }

    /// First pass: everything derivable from one record alone
    pub fn resolve_record(&self, record: &ContentRecord) -> ResolvedPage {
        let fm = &record.front_matter;
        let config = &self.site.config;

        let stem = record.file_stem();
        let (stem_date, stem_slug) = match split_dated_stem(stem) {
            Some((date, slug)) => (Some(date), slug),
            None => (None, stem),
        };

        let slug = slug::slugify(fm.slug().unwrap_or(stem_slug));
        let date = fm
            .date()
            .and_then(|d| parse_date(d, &self.tz))
            .or_else(|| stem_date.and_then(|d| start_of_day(d, &self.tz)));
        let title = fm.title().unwrap_or(stem_slug).to_string();
        let layout = fm
            .layout()
            .or_else(|| config.default_layout(record.kind))
            .map(str::to_string);
        let tags = fm.tags();
        let categories = fm.categories();

        // A permalink that could climb out of the site is ignored
        let path = match fm.permalink().filter(|p| !has_dot_segment(p)) {
            Some(p) if is_root_relative(p) => p.to_string(),
            Some(p) => format!("/{}", p.trim_start_matches('/')),
            None if record.kind.is_post() => {
                expand_permalink(&config.permalink, date.as_ref(), &slug, &categories)
            }
            None => page_path_from_source(&record.source_str()),
        };
        let url = encode_path(&url_for(config, &path));
        let permalink = encode_path(&full_url_for(config, &path));

        let (excerpt_md, full_md) =
            MarkdownRenderer::split_excerpt(&record.body, &config.excerpt_separator);
        let excerpt = match fm.excerpt() {
            Some(text) => Some(self.renderer.render(text)),
            None => excerpt_md.map(|md| self.renderer.render(&md)),
        };

        ResolvedPage {
            kind: record.kind,
            title,
            layout,
            date,
            path,
            url,
            permalink,
            slug,
            tags,
            categories,
            excerpt,
            content: self.renderer.render(&full_md),
            word_count: self.renderer.count_words(&full_md),
            source: record.source_str(),
            front_matter: fm.clone(),
            previous: None,
            next: None,
            related: Vec::new(),
        }
    }

    /// Second pass over sorted posts: neighbours and related posts
    fn link_posts(&self, posts: &mut [ResolvedPage]) {
        // Drafts are never linked from published posts
        let linkable: Vec<usize> = (0..posts.len())
            .filter(|&i| posts[i].kind == ContentKind::Post)
            .collect();

        let links: Vec<PageLink> = posts.iter().map(ResolvedPage::link).collect();
        let related: Vec<Vec<usize>> = (0..posts.len())
            .map(|i| related_posts(posts, i, self.site.config.related_posts))
            .collect();

        for (pos, &i) in linkable.iter().enumerate() {
            posts[i].next = pos.checked_sub(1).map(|p| links[linkable[p]].clone());
            posts[i].previous = linkable.get(pos + 1).map(|&p| links[p].clone());
        }

        for (i, indices) in related.into_iter().enumerate() {
            posts[i].related = indices
                .into_iter()
                .filter(|&j| posts[j].kind == ContentKind::Post)
                .map(|j| links[j].clone())
                .collect();
        }
    }
}
