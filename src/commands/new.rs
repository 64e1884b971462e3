//! Create a new post, draft or page

use anyhow::Result;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;

use crate::content::{ContentKind, FrontMatter, FrontMatterFormat, Value};
use crate::Site;

/// Create a content file with a front-matter block and return its path.
///
/// Posts are named `_posts/YYYY-MM-DD-<slug>.md`, drafts
/// `_drafts/<slug>.md` and pages `<slug>.md`.
pub fn create(site: &Site, title: &str, kind: ContentKind) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a usable file name", title);
    }

    let tz = site.config.tz()?;
    let now = Utc::now().with_timezone(&tz);

    let file_path = match kind {
        ContentKind::Post => site
            .source_dir
            .join("_posts")
            .join(format!("{}-{}.md", now.format("%Y-%m-%d"), slug)),
        ContentKind::Draft => site.source_dir.join("_drafts").join(format!("{}.md", slug)),
        ContentKind::Page => site.source_dir.join(format!("{}.md", slug)),
    };

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let layout = site
        .config
        .default_layout(kind)
        .unwrap_or(kind.as_str())
        .to_string();

    let mut fm = FrontMatter::new();
    fm.insert("layout", layout);
    fm.insert("title", title);
    match kind {
        ContentKind::Post | ContentKind::Draft => {
            fm.insert("date", Value::Date(now.format("%Y-%m-%d %H:%M:%S %z").to_string()));
            fm.insert("tags", Vec::<String>::new());
        }
        ContentKind::Page => {
            fm.insert("permalink", format!("/{}/", slug));
        }
    }

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, fm.to_block(FrontMatterFormat::Yaml)?)?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}
