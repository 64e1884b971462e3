//! Required-field validation for content records
//!
//! Validation never fails: it returns the list of problems found, and the
//! build reports them as warnings while still emitting the record.

use serde::Serialize;
use std::fmt;

use super::{ContentRecord, Value};
use crate::helpers::is_root_relative;

/// Keys whose values must be text
const STRING_KEYS: &[&str] = &[
    "layout",
    "title",
    "subtitle",
    "author",
    "excerpt",
    "header-img",
    "permalink",
];

/// Keys that accept a single string or a list of strings
const LIST_KEYS: &[&str] = &["tags", "categories"];

const BOOL_KEYS: &[&str] = &["hide_banner", "published"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    Missing,
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    UnparseableDate {
        value: String,
    },
    NotRootRelative {
        value: String,
    },
}

/// One problem with one front-matter field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl Violation {
    fn new(field: &str, kind: ViolationKind) -> Self {
        Self {
            field: field.to_string(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "missing required field `{}`", self.field),
            ViolationKind::WrongType { expected, found } => {
                write!(f, "`{}` should be a {}, found {}", self.field, expected, found)
            }
            ViolationKind::UnparseableDate { value } => {
                write!(f, "`{}` is not a recognizable date: {:?}", self.field, value)
            }
            ViolationKind::NotRootRelative { value } => write!(
                f,
                "`{}` must be a root-relative path, found {:?}",
                self.field, value
            ),
        }
    }
}

/// Outcome of validating one record; empty means valid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    violations: Vec<Violation>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    fn push(&mut self, field: &str, kind: ViolationKind) {
        self.violations.push(Violation::new(field, kind));
    }
}

impl IntoIterator for ValidationResult {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

/// Validate a record's front matter.
///
/// `default_layout` is the site-configured layout for the record's kind; it
/// satisfies the `layout` requirement for posts that do not declare one.
pub fn validate(record: &ContentRecord, default_layout: Option<&str>) -> ValidationResult {
    let fm = &record.front_matter;
    let mut result = ValidationResult::default();

    for (key, value) in fm.iter() {
        if value.is_null() {
            continue;
        }
        let key = key.as_str();
        if STRING_KEYS.contains(&key) && value.as_str().is_none() {
            result.push(key, wrong_type("string", value));
        } else if LIST_KEYS.contains(&key) && value.to_string_list().is_none() {
            result.push(key, wrong_type("list of strings", value));
        } else if BOOL_KEYS.contains(&key) && value.as_bool().is_none() {
            result.push(key, wrong_type("boolean", value));
        } else if key == "date" {
            match value {
                Value::Date(_) => {}
                Value::String(s) => result.push(
                    key,
                    ViolationKind::UnparseableDate { value: s.clone() },
                ),
                other => result.push(key, wrong_type("date", other)),
            }
        }
    }

    let declares_post = fm.layout() == Some("post");

    if record.kind.is_post() && !fm.has("layout") && default_layout.is_none() {
        result.push("layout", ViolationKind::Missing);
    }

    if record.kind.is_post() || declares_post {
        for key in ["title", "date"] {
            if !fm.has(key) {
                result.push(key, ViolationKind::Missing);
            }
        }
    } else if !fm.has("permalink") && record.file_stem() != "index" {
        // index files are routed by their directory
        result.push("permalink", ViolationKind::Missing);
    }

    if let Some(permalink) = fm.permalink() {
        if !is_root_relative(permalink) {
            result.push(
                "permalink",
                ViolationKind::NotRootRelative {
                    value: permalink.to_string(),
                },
            );
        }
    }

    result
}

fn wrong_type(expected: &'static str, found: &Value) -> ViolationKind {
    ViolationKind::WrongType {
        expected,
        found: found.type_name(),
    }
}
