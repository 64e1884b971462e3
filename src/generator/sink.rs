//! Page sinks: where resolved pages go
//!
//! HTML templating happens outside folio. The default sink writes each
//! resolved page as JSON at its URL so any template engine can pick it up.

use std::fs;
use std::path::{Component, Path, PathBuf};

use super::ResolvedPage;
use crate::error::{Error, Result};
use crate::helpers::canonical_page_path;

/// Receives resolved pages one at a time
pub trait PageSink {
    fn emit(&mut self, page: &ResolvedPage) -> Result<()>;
}

/// Collects pages in memory
impl PageSink for Vec<ResolvedPage> {
    fn emit(&mut self, page: &ResolvedPage) -> Result<()> {
        self.push(page.clone());
        Ok(())
    }
}

/// Writes `<root>/<path>/index.json` for each page
pub struct JsonSink {
    root: PathBuf,
}

impl JsonSink {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Output file for a root-relative page path.
    ///
    /// `/about/` maps to `about/index.json`, `/2020/hello.html` to
    /// `2020/hello.json`. Paths that are not plain names below the root
    /// are refused.
    pub fn output_path(&self, path: &str) -> Result<PathBuf> {
        let canonical = canonical_page_path(path);
        let relative = Path::new(canonical.trim_start_matches('/'));

        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return Err(Error::UnsafeOutputPath(path.to_string()));
        }

        if canonical.ends_with('/') {
            Ok(self.root.join(relative).join("index.json"))
        } else {
            Ok(self.root.join(relative.with_extension("json")))
        }
    }
}

impl PageSink for JsonSink {
    fn emit(&mut self, page: &ResolvedPage) -> Result<()> {
        let output_path = self.output_path(&page.path)?;
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(page)?;
        fs::write(&output_path, json)?;
        tracing::debug!("Wrote {:?}", output_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        let sink = JsonSink::new("/out");
        assert_eq!(sink.output_path("/").unwrap(), PathBuf::from("/out/index.json"));
        assert_eq!(
            sink.output_path("/about/").unwrap(),
            PathBuf::from("/out/about/index.json")
        );
        assert_eq!(
            sink.output_path("/about").unwrap(),
            PathBuf::from("/out/about/index.json")
        );
        assert_eq!(
            sink.output_path("/2020/01/01/hello.html").unwrap(),
            PathBuf::from("/out/2020/01/01/hello.json")
        );
        assert_eq!(
            sink.output_path("/feed").unwrap(),
            PathBuf::from("/out/feed/index.json")
        );
    }

    #[test]
    fn test_output_path_stays_below_root() {
        let sink = JsonSink::new("/out");
        for path in ["/../../escaped/", "/a/../b/", "/a/../../b.html", "/.."] {
            let err = sink.output_path(path).unwrap_err();
            assert!(matches!(err, Error::UnsafeOutputPath(_)), "{}", path);
        }
    }
}
