//! Helper functions shared by the loader and the generator
//!
//! Date parsing understands the formats blog front matter uses in the wild;
//! URL helpers build root-relative paths from permalink patterns.

mod date;
mod url;

pub use date::*;
pub use url::*;
