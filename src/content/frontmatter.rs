//! Front-matter parsing
//!
//! A content file may start with a metadata block fenced by delimiter lines:
//!
//! ```text
//! ---
//! layout: post
//! title: Example
//! tags: [a, b]
//! ---
//! Hello world
//! ```
//!
//! `---` fences a YAML-style `key: value` block, `+++` a TOML block. The
//! decoded block is a flat, ordered map of keys to [`Value`]s.

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use super::Value;

/// Why a front-matter block could not be decoded.
///
/// A file failing with any of these is dropped from the build and reported.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front-matter opened with `{delimiter}` is never closed")]
    Unterminated { delimiter: &'static str },

    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML front-matter: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to write TOML front-matter: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("front-matter must be a mapping of keys to values")]
    NotAMapping,

    #[error("front-matter keys must be strings")]
    InvalidKey,

    #[error("duplicate front-matter key `{0}`")]
    DuplicateKey(String),

    #[error("value of `{key}` must be a scalar or a list of scalars")]
    UnsupportedValue { key: String },
}

/// Delimiter flavours for front matter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontMatterFormat {
    /// `---` fenced, `key: value` lines
    Yaml,
    /// `+++` fenced, `key = value` lines
    Toml,
}

impl FrontMatterFormat {
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }

    fn from_delimiter_line(line: &str) -> Option<Self> {
        match line.trim_end() {
            "---" => Some(Self::Yaml),
            "+++" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// A front-matter block located in a file, not yet decoded
#[derive(Debug, Clone, Copy)]
pub struct Split<'a> {
    pub format: FrontMatterFormat,
    /// Text between the delimiter lines
    pub block: &'a str,
    /// Everything after the closing delimiter line
    pub body: &'a str,
}

/// Locate the front-matter block at the very top of `content`.
///
/// Returns `Ok(None)` when the first line is not a delimiter.
pub fn split(content: &str) -> Result<Option<Split<'_>>, FrontMatterError> {
    let text = content.strip_prefix('\u{feff}').unwrap_or(content);

    let (first_line, block_start) = match text.find('\n') {
        Some(pos) => (&text[..pos], pos + 1),
        None => (text, text.len()),
    };

    let Some(format) = FrontMatterFormat::from_delimiter_line(first_line) else {
        return Ok(None);
    };

    let mut offset = block_start;
    while offset < text.len() {
        let line_end = text[offset..]
            .find('\n')
            .map(|pos| offset + pos + 1)
            .unwrap_or(text.len());

        if text[offset..line_end].trim_end() == format.delimiter() {
            let block = &text[block_start..offset];
            let body = &text[line_end..];
            return Ok(Some(Split {
                format,
                block,
                body,
            }));
        }

        offset = line_end;
    }

    Err(FrontMatterError::Unterminated {
        delimiter: format.delimiter(),
    })
}

/// Decoded front-matter: an ordered map of case-sensitive keys to values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FrontMatter {
    fields: IndexMap<String, Value>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse front-matter from content string
    /// Returns (format, front_matter, remaining_content)
    pub fn parse(
        content: &str,
    ) -> Result<(Option<FrontMatterFormat>, Self, &str), FrontMatterError> {
        let Some(split) = split(content)? else {
            return Ok((None, FrontMatter::default(), content));
        };

        // A `---` pair around prose is a pair of Markdown horizontal rules,
        // not front matter
        if split.format == FrontMatterFormat::Yaml
            && !is_blank_block(split.block)
            && !has_yaml_structure(split.block)
        {
            tracing::debug!("Leading `---` block has no keys, treating as content");
            return Ok((None, FrontMatter::default(), content));
        }

        let fm = Self::decode(split.format, split.block)?;
        Ok((Some(split.format), fm, split.body))
    }

    /// Decode the text between the delimiter lines
    pub fn decode(format: FrontMatterFormat, block: &str) -> Result<Self, FrontMatterError> {
        if is_blank_block(block) {
            return Ok(Self::default());
        }

        let fields = match format {
            FrontMatterFormat::Yaml => decode_yaml(block)?,
            FrontMatterFormat::Toml => decode_toml(block)?,
        };

        Ok(Self { fields })
    }

    /// Serialize back to a delimited block, ready to prepend to a body.
    ///
    /// Re-parsing the output yields an identical map. TOML has no null, so
    /// null values are dropped from TOML output.
    pub fn to_block(&self, format: FrontMatterFormat) -> Result<String, FrontMatterError> {
        let delimiter = format.delimiter();
        let mut out = format!("{}\n", delimiter);

        if !self.fields.is_empty() {
            let text = match format {
                FrontMatterFormat::Yaml => {
                    let mut mapping = serde_yaml::Mapping::with_capacity(self.fields.len());
                    for (key, value) in &self.fields {
                        mapping.insert(serde_yaml::Value::String(key.clone()), value.to_yaml());
                    }
                    serde_yaml::to_string(&mapping)?
                }
                FrontMatterFormat::Toml => {
                    let mut table = toml::Table::new();
                    for (key, value) in &self.fields {
                        if let Some(value) = value.to_toml() {
                            table.insert(key.clone(), value);
                        }
                    }
                    toml::to_string(&table)?
                }
            };
            out.push_str(&text);
            if !out.ends_with('\n') {
                out.push('\n');
            }
        }

        out.push_str(delimiter);
        out.push('\n');
        Ok(out)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// A non-empty string (or date) value
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// Whether `key` is present with a non-null value
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| !v.is_null())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    pub fn layout(&self) -> Option<&str> {
        self.get_str("layout")
    }

    pub fn permalink(&self) -> Option<&str> {
        self.get_str("permalink")
    }

    pub fn date(&self) -> Option<&str> {
        self.get_str("date")
    }

    pub fn excerpt(&self) -> Option<&str> {
        self.get_str("excerpt")
    }

    pub fn slug(&self) -> Option<&str> {
        self.get_str("slug")
    }

    pub fn tags(&self) -> Vec<String> {
        self.string_list("tags")
    }

    pub fn categories(&self) -> Vec<String> {
        self.string_list("categories")
    }

    /// Posts are published unless `published: false`
    pub fn published(&self) -> bool {
        self.get("published")
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    fn string_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .and_then(Value::to_string_list)
            .unwrap_or_default()
    }
}

fn decode_yaml(block: &str) -> Result<IndexMap<String, Value>, FrontMatterError> {
    if let Some(key) = duplicate_top_level_key(block) {
        return Err(FrontMatterError::DuplicateKey(key));
    }

    let mapping = match serde_yaml::from_str::<serde_yaml::Value>(block)? {
        serde_yaml::Value::Null => return Ok(IndexMap::new()),
        serde_yaml::Value::Mapping(mapping) => mapping,
        _ => return Err(FrontMatterError::NotAMapping),
    };

    let mut fields = IndexMap::with_capacity(mapping.len());
    for (key, value) in mapping {
        let key = match key {
            serde_yaml::Value::String(s) => s,
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            _ => return Err(FrontMatterError::InvalidKey),
        };
        let value = Value::from_yaml(&key, value)?;
        if fields.insert(key.clone(), value).is_some() {
            return Err(FrontMatterError::DuplicateKey(key));
        }
    }

    Ok(fields)
}

fn decode_toml(block: &str) -> Result<IndexMap<String, Value>, FrontMatterError> {
    let table: toml::Table = toml::from_str(block)?;

    let mut fields = IndexMap::with_capacity(table.len());
    for (key, value) in table {
        let value = Value::from_toml(&key, value)?;
        fields.insert(key, value);
    }

    Ok(fields)
}

fn is_blank_block(block: &str) -> bool {
    block.lines().all(|line| {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with('#')
    })
}

/// Valid front-matter has at least one `key:` line. Markdown lists
/// (`- item`) alone do not count.
fn has_yaml_structure(block: &str) -> bool {
    block.lines().any(|line| key_of_line(line.trim()).is_some())
}

/// Duplicates are only detectable before decoding; the decoded map
/// has already collapsed them.
fn duplicate_top_level_key(block: &str) -> Option<String> {
    let mut seen = std::collections::HashSet::new();
    block
        .lines()
        .filter(|line| !line.starts_with([' ', '\t']))
        .filter_map(key_of_line)
        .find(|key| !seen.insert(*key))
        .map(str::to_string)
}

/// The key of a `key: value` line, if the line has that shape
fn key_of_line(line: &str) -> Option<&str> {
    if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
        return None;
    }

    let colon_pos = line.find(':')?;
    let key = line[..colon_pos].trim_end();
    let key = key
        .strip_prefix('"')
        .and_then(|k| k.strip_suffix('"'))
        .or_else(|| key.strip_prefix('\'').and_then(|k| k.strip_suffix('\'')))
        .unwrap_or(key);

    // The colon must not be part of a URL (http:, https:, etc.)
    let is_valid_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !matches!(key, "http" | "https" | "ftp");
    if !is_valid_key {
        return None;
    }

    let after_colon = &line[colon_pos + 1..];
    if after_colon.is_empty() || after_colon.starts_with([' ', '\t']) {
        Some(key)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_example_post() {
        let content = "---\nlayout: post\ntitle: Example\ndate: 2020-01-01\ntags: [a, b]\n---\nHello world";

        let (format, fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(format, Some(FrontMatterFormat::Yaml));
        assert_eq!(fm.get("layout"), Some(&Value::from("post")));
        assert_eq!(fm.get("title"), Some(&Value::from("Example")));
        assert_eq!(fm.get("date"), Some(&Value::Date("2020-01-01".into())));
        assert_eq!(
            fm.get("tags"),
            Some(&Value::List(vec!["a".into(), "b".into()]))
        );
        assert_eq!(fm.len(), 4);
        assert_eq!(body, "Hello world");
    }

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15 10:30:00
tags:
  - rust
  - angular
categories:
  - programming
header-img: img/post-bg.jpg
hide_banner: true
---

This is the content.
"#;

        let (_, fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title(), Some("Hello World"));
        assert_eq!(fm.tags(), vec!["rust", "angular"]);
        assert_eq!(fm.categories(), vec!["programming"]);
        assert_eq!(fm.get_str("header-img"), Some("img/post-bg.jpg"));
        assert_eq!(fm.get("hide_banner"), Some(&Value::Bool(true)));
        assert_eq!(remaining, "\nThis is the content.\n");
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let content = "---\nTitle: Upper\ntitle: lower\n---\n";
        let (_, fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get_str("Title"), Some("Upper"));
        assert_eq!(fm.title(), Some("lower"));
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = r#"---
title: Single Tag Post
date: 2024-01-15
tags: Notes
categories: Blog
---

Content here.
"#;

        let (_, fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title(), Some("Single Tag Post"));
        assert_eq!(fm.tags(), vec!["Notes"]);
        assert_eq!(fm.categories(), vec!["Blog"]);
    }

    #[test]
    fn test_empty_list_key() {
        let content = "---\ntitle: Draft\ntags:\n---\nbody";
        let (_, fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.get("tags"), Some(&Value::Null));
        assert!(!fm.has("tags"));
        assert!(fm.tags().is_empty());
    }

    #[test]
    fn test_no_frontmatter_keeps_body_verbatim() {
        let content = "# Just Markdown\n\nNo metadata here.\n";
        let (format, fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(format, None);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_delimiter_must_be_first_line() {
        let content = "\n---\ntitle: Late\n---\nbody";
        let (format, fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(format, None);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unterminated_block_is_malformed() {
        let content = "---\nlayout: post\ntitle: Broken\n\nThe closing line never comes.\n";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(
            err,
            FrontMatterError::Unterminated { delimiter: "---" }
        ));
    }

    #[test]
    fn test_invalid_syntax_is_malformed() {
        let content = "---\ntitle: [unclosed\n---\nbody";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_invalid_indentation_is_malformed() {
        let content = "---\ntitle: Example\n  layout: post\n---\nbody";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let content = "---\ntitle: First\nlayout: post\ntitle: Second\n---\nbody";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, FrontMatterError::DuplicateKey(ref k) if k == "title"));
    }

    #[test]
    fn test_nested_mapping_rejected() {
        let content = "---\ntitle: x\nauthor:\n  name: Someone\n---\nbody";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, FrontMatterError::UnsupportedValue { ref key } if key == "author"));
    }

    #[test]
    fn test_body_keeps_leading_blank_lines() {
        let content = "---\ntitle: Code\n---\n\n\n    indented code\n";
        let (_, fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title(), Some("Code"));
        assert_eq!(body, "\n\n    indented code\n");
    }

    #[test]
    fn test_nan_is_malformed() {
        let err = FrontMatter::parse("---\nscore: .nan\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::UnsupportedValue { ref key } if key == "score"));
    }

    #[test]
    fn test_empty_block() {
        let (format, fm, body) = FrontMatter::parse("---\n---\nbody").unwrap();
        assert_eq!(format, Some(FrontMatterFormat::Yaml));
        assert!(fm.is_empty());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_crlf_and_bom() {
        let content = "\u{feff}---\r\ntitle: Windows\r\n---\r\nbody\r\n";
        let (_, fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title(), Some("Windows"));
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_parse_toml_frontmatter() {
        let content = "+++\ntitle = \"Toml Post\"\ndate = 2024-01-15\ntags = [\"a\", \"b\"]\n+++\nbody";
        let (format, fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(format, Some(FrontMatterFormat::Toml));
        assert_eq!(fm.title(), Some("Toml Post"));
        assert_eq!(fm.date(), Some("2024-01-15"));
        assert_eq!(fm.tags(), vec!["a", "b"]);
        assert_eq!(body, "body");
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"---

Some random text with markdown lists:
- Item 1
- Item 2

-- 2025-11-09

---
More content here.
"#;

        let (format, fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(format, None);
        assert!(fm.is_empty());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_content_with_url_not_yaml() {
        let content = r#"---

Check out https://example.com/path and http://test.com

---
More content.
"#;

        let (_, fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.is_empty());
        assert!(remaining.contains("https://example.com"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let content = r#"---
layout: post
title: "NgRx: effects in practice"
subtitle: 'yes'
date: 2016-09-11 19:30:00 +0800
author: Someone
tags: [angular, ngrx, "1"]
categories:
  - tutorials
hide_banner: false
reading_time: 7
rating: 4.5
permalink: /ngrx-effects/
excerpt:
---
body"#;

        let (_, fm, _) = FrontMatter::parse(content).unwrap();
        let block = fm.to_block(FrontMatterFormat::Yaml).unwrap();
        let (format, reparsed, body) = FrontMatter::parse(&block).unwrap();

        assert_eq!(format, Some(FrontMatterFormat::Yaml));
        assert_eq!(reparsed, fm);
        assert_eq!(body, "");
        assert_eq!(reparsed.get("subtitle"), Some(&Value::from("yes")));
        assert_eq!(reparsed.get("reading_time"), Some(&Value::Integer(7)));
    }

    #[test]
    fn test_toml_round_trip() {
        let content = "+++\ntitle = \"About\"\npermalink = \"/about/\"\ndate = 2020-01-01T10:00:00Z\nweight = 3\n+++\n";
        let (_, fm, _) = FrontMatter::parse(content).unwrap();
        let block = fm.to_block(FrontMatterFormat::Toml).unwrap();
        let (_, reparsed, _) = FrontMatter::parse(&block).unwrap();
        assert_eq!(reparsed, fm);
    }

    #[test]
    fn test_empty_round_trip() {
        let block = FrontMatter::new().to_block(FrontMatterFormat::Yaml).unwrap();
        assert_eq!(block, "---\n---\n");
    }

    #[test]
    fn test_key_of_line() {
        assert_eq!(key_of_line("title: x"), Some("title"));
        assert_eq!(key_of_line("tags:"), Some("tags"));
        assert_eq!(key_of_line("\"header-img\": a.jpg"), Some("header-img"));
        assert_eq!(key_of_line("https://example.com"), None);
        assert_eq!(key_of_line("- item: 1"), None);
        assert_eq!(key_of_line("Note: prose"), Some("Note"));
    }
}
