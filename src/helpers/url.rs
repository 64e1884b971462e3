//! URL helper functions

use chrono::{DateTime, FixedOffset};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped in URL paths. `/` is kept so paths stay readable.
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Generate a URL with the configured `baseurl`
///
/// # Examples
/// ```ignore
/// url_for(&config, "/about/") // -> "/blog/about/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.baseurl.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    format!("{}{}", config.url.trim_end_matches('/'), url_for(config, path))
}

/// Whether `path` is a root-relative URL path (`/about/`).
///
/// Protocol-relative (`//host/x`) and absolute URLs are rejected, and so
/// is any path with a `.` or `..` segment.
pub fn is_root_relative(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains("://")
        && !has_dot_segment(path)
}

/// Whether any `/`- or `\\`-separated segment is `.` or `..`
pub fn has_dot_segment(path: &str) -> bool {
    path.split(['/', '\\']).any(|s| s == "." || s == "..")
}

/// Expand a permalink pattern such as `/:year/:month/:day/:title/`
pub fn expand_permalink(
    pattern: &str,
    date: Option<&DateTime<FixedOffset>>,
    slug: &str,
    categories: &[String],
) -> String {
    let categories = categories
        .iter()
        .map(|c| slug::slugify(c))
        .collect::<Vec<_>>()
        .join("/");

    let mut result = pattern.to_string();

    if let Some(date) = date {
        result = result
            .replace(":year", &date.format("%Y").to_string())
            .replace(":i_month", &date.format("%-m").to_string())
            .replace(":month", &date.format("%m").to_string())
            .replace(":i_day", &date.format("%-d").to_string())
            .replace(":day", &date.format("%d").to_string());
    } else {
        for token in [":year", ":i_month", ":month", ":i_day", ":day"] {
            result = result.replace(token, "");
        }
    }

    let result = result
        .replace(":categories", &categories)
        .replace(":title", slug)
        .replace(":slug", slug);

    normalize_path(&result)
}

/// Path for a standalone page derived from its source file.
///
/// `about.md` becomes `/about/`, `docs/index.md` becomes `/docs/`.
pub fn page_path_from_source(source: &str) -> String {
    let source = source.replace('\\', "/");
    let without_ext = source
        .trim_end_matches(".markdown")
        .trim_end_matches(".md");

    let path = if without_ext == "index" || without_ext.ends_with("/index") {
        without_ext.trim_end_matches("index").to_string()
    } else {
        format!("{}/", without_ext)
    };

    normalize_path(&path)
}

/// The page address two paths share when they are served by the same file.
///
/// `/about`, `/about/`, `//about` and `/about/index.html` all become
/// `/about/`. Paths ending in `.html` or `.htm` keep their file name.
pub fn canonical_page_path(path: &str) -> String {
    let path = normalize_path(path);
    let (dir, file) = match path.rfind('/') {
        Some(pos) => path.split_at(pos + 1),
        None => (path.as_str(), ""),
    };

    match file.rsplit_once('.') {
        _ if file.is_empty() => path.clone(),
        Some(("index", "html" | "htm")) => dir.to_string(),
        Some((_, "html" | "htm")) => path.clone(),
        _ => format!("{}/", path),
    }
}

/// Percent-encode a URL path
pub fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_ESCAPE).to_string()
}

/// Collapse empty segments and make the path root-relative.
/// A trailing slash on the input is preserved.
fn normalize_path(path: &str) -> String {
    let trailing = path.ends_with('/');
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if segments.is_empty() {
        return "/".to_string();
    }

    let mut out = format!("/{}", segments.join("/"));
    if trailing {
        out.push('/');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            url: "https://example.com".to_string(),
            baseurl: "/blog".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/about/"), "/blog/about/");
        assert_eq!(url_for(&SiteConfig::default(), "/about/"), "/about/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/about/"),
            "https://example.com/blog/about/"
        );
    }

    #[test]
    fn test_is_root_relative() {
        assert!(is_root_relative("/about/"));
        assert!(is_root_relative("/"));
        assert!(!is_root_relative("about/"));
        assert!(!is_root_relative("//cdn.example.com/x"));
        assert!(!is_root_relative("https://example.com/about/"));
        assert!(!is_root_relative("/../../escaped/"));
        assert!(!is_root_relative("/blog/./about/"));
        assert!(is_root_relative("/v1.2/notes..md/"));
    }

    #[test]
    fn test_canonical_page_path() {
        assert_eq!(canonical_page_path("/about"), "/about/");
        assert_eq!(canonical_page_path("/about/"), "/about/");
        assert_eq!(canonical_page_path("about//"), "/about/");
        assert_eq!(canonical_page_path("/about/index.html"), "/about/");
        assert_eq!(canonical_page_path("/2020/hello.html"), "/2020/hello.html");
        assert_eq!(canonical_page_path("/feed.xml"), "/feed.xml/");
        assert_eq!(canonical_page_path("/"), "/");
        assert_eq!(canonical_page_path(""), "/");
    }

    #[test]
    fn test_has_dot_segment() {
        assert!(has_dot_segment(".."));
        assert!(has_dot_segment("/a/../b"));
        assert!(has_dot_segment("a\\..\\b"));
        assert!(!has_dot_segment("/a.b/..c/"));
    }

    #[test]
    fn test_expand_permalink() {
        let date = DateTime::parse_from_rfc3339("2020-03-07T10:00:00+00:00").unwrap();
        let cats = vec!["Angular".to_string(), "NgRx Store".to_string()];
        assert_eq!(
            expand_permalink("/:year/:month/:day/:title/", Some(&date), "hello", &cats),
            "/2020/03/07/hello/"
        );
        assert_eq!(
            expand_permalink("/:categories/:i_month/:title.html", Some(&date), "hello", &cats),
            "/angular/ngrx-store/3/hello.html"
        );
    }

    #[test]
    fn test_expand_permalink_without_date() {
        assert_eq!(
            expand_permalink("/:year/:month/:title/", None, "draft", &[]),
            "/draft/"
        );
    }

    #[test]
    fn test_page_path_from_source() {
        assert_eq!(page_path_from_source("about.md"), "/about/");
        assert_eq!(page_path_from_source("index.md"), "/");
        assert_eq!(page_path_from_source("docs/index.markdown"), "/docs/");
    }

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("/a b/"), "/a%20b/");
        assert_eq!(encode_path("/中文/"), "/%E4%B8%AD%E6%96%87/");
    }
}
