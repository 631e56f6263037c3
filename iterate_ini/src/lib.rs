//! Locate sectioned configuration files and flatten them into records.
//!
//! Given one or more file references ("terms"), the crate resolves each one
//! against a [`SearchContext`], parses the file as a sectioned
//! `option = value` document and returns every assignment as a
//! [`ConfigRecord`]. Records keep file order: terms in the order given,
//! sections in declaration order, options in first-occurrence order. Option
//! names are case-sensitive.
//!
//! ```rust,no_run
//! use iterate_ini::{ConfigRecord, SearchContext};
//!
//! # fn main() -> iterate_ini::LookupResult<()> {
//! let context = SearchContext::from_dirs(["roles/db"]);
//! let records = iterate_ini::run(["db.ini"], &context)?;
//! assert_eq!(records[0], ConfigRecord::new("db", "Host", "localhost"));
//! # Ok(())
//! # }
//! ```
//!
//! Failures are terminal: an unresolved term yields
//! [`LookupError::NotFound`], a malformed file [`LookupError::Parse`], and in
//! both cases no records are returned.

mod diagnostics;
mod error;
mod flatten;
pub mod host;
mod ini;
mod locator;
mod lookup;
mod record;

pub use diagnostics::{Diagnostics, NoopDiagnostics, TracingDiagnostics};
pub use error::{LookupError, LookupResult};
pub use flatten::{flatten, flatten_with, is_encoding_error};
pub use ini::{IniDocument, ParseOptions, Section, SyntaxError};
pub use locator::{DEFAULT_SUBDIR, SearchContext, SearchContextBuilder};
pub use lookup::{IniLookup, run};
pub use record::ConfigRecord;
