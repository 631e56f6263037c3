//! Error types produced by the lookup.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Convenience alias for results returned by this crate.
pub type LookupResult<T> = Result<T, LookupError>;

/// Errors that can occur while resolving and flattening lookup terms.
///
/// Every variant is terminal: the lookup stops at the first error and
/// returns no partial output.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LookupError {
    /// A term did not resolve to an existing file on the search path.
    #[error("could not locate file in lookup: {term}")]
    NotFound {
        /// Term exactly as supplied by the caller.
        term: String,
    },

    /// A resolved file is not valid sectioned configuration syntax.
    #[error("failed to parse '{path}' at line {line}: {message}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// One-based line number of the offending line.
        line: usize,
        /// Description of the syntax problem.
        message: String,
    },

    /// A resolved file could not be read.
    #[error("failed to read '{path}': {source}")]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Records could not be converted into the host's JSON representation.
    #[error("failed to encode lookup records: {0}")]
    Encode(#[from] serde_json::Error),
}

impl LookupError {
    /// Returns `true` when the error reports an unresolved term.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` when the error reports invalid file syntax.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns the file path attached to the error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Parse { path, .. } | Self::Read { path, .. } => Some(path.as_path()),
            Self::NotFound { .. } | Self::Encode(_) => None,
        }
    }
}

pub(crate) fn not_found(term: &str) -> LookupError {
    LookupError::NotFound {
        term: term.to_owned(),
    }
}

pub(crate) fn read_error(path: &Path, source: io::Error) -> LookupError {
    LookupError::Read {
        path: path.to_path_buf(),
        source,
    }
}
