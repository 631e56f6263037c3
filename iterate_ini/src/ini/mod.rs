//! Parsing of sectioned `option = value` documents.
//!
//! The accepted syntax is the one written by common section-based tooling:
//!
//! ```text
//! # comment
//! [section]
//! Option = value
//! other: value
//!   continued on an indented line
//! ```
//!
//! Option names keep their casing, so `Host` and `host` are distinct
//! options. Repeated options within a section keep their first position and
//! take the last value; repeated section headers merge into the first.

mod document;
mod options;
mod parser;

pub use document::{IniDocument, Section};
pub use options::ParseOptions;
pub use parser::SyntaxError;
