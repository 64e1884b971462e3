//! Content module - parses, validates and loads Markdown content files

mod frontmatter;
pub mod loader;
mod markdown;
mod record;
pub mod validate;
mod value;

pub use frontmatter::{split, FrontMatter, FrontMatterError, FrontMatterFormat, Split};
pub use loader::{ContentLoader, LoadReport};
pub use markdown::MarkdownRenderer;
pub use record::{ContentKind, ContentRecord};
pub use validate::{ValidationResult, Violation, ViolationKind};
pub use value::Value;
