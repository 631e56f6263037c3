//! Resolution of lookup terms to files on the controller.
//!
//! A [`SearchContext`] holds an ordered list of base directories. For a
//! relative term each base contributes two candidates, the conventional
//! subdirectory first (`<base>/files/<term>`) and then the base itself
//! (`<base>/<term>`). The first candidate naming a regular file wins.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use camino::Utf8PathBuf;

mod builder;

pub use builder::SearchContextBuilder;

/// Subdirectory searched under every base directory unless overridden.
pub const DEFAULT_SUBDIR: &str = "files";

/// Ordered set of directories used to resolve lookup terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchContext {
    base_dirs: Vec<PathBuf>,
    subdir: Option<String>,
    env_var: Option<String>,
}

impl Default for SearchContext {
    fn default() -> Self {
        SearchContextBuilder::new().build()
    }
}

impl SearchContext {
    /// Creates a builder with no base directories.
    #[must_use]
    pub fn builder() -> SearchContextBuilder {
        SearchContextBuilder::new()
    }

    /// Convenience constructor searching `dirs` in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use iterate_ini::SearchContext;
    ///
    /// let context = SearchContext::from_dirs(["/srv/role", "/srv/playbook"]);
    /// let candidates = context.candidates("app.ini");
    /// assert_eq!(candidates[0], std::path::PathBuf::from("/srv/role/files/app.ini"));
    /// assert_eq!(candidates[1], std::path::PathBuf::from("/srv/role/app.ini"));
    /// ```
    #[must_use]
    pub fn from_dirs<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        SearchContextBuilder::new().base_dirs(dirs).build()
    }

    /// Base directories in search order, excluding environment additions.
    #[must_use]
    pub fn base_dirs(&self) -> &[PathBuf] {
        &self.base_dirs
    }

    fn push_unique(paths: &mut Vec<PathBuf>, seen: &mut HashSet<PathBuf>, candidate: PathBuf) {
        if candidate.as_os_str().is_empty() {
            return;
        }
        if seen.insert(candidate.clone()) {
            paths.push(candidate);
        }
    }

    fn search_bases(&self) -> Vec<PathBuf> {
        let mut bases = self.base_dirs.clone();
        if let Some(value) = self
            .env_var
            .as_ref()
            .and_then(|env_var| std::env::var_os(env_var).filter(|v| !v.is_empty()))
        {
            bases.extend(std::env::split_paths(&value).filter(|p| !p.as_os_str().is_empty()));
        }
        if bases.is_empty() {
            if let Ok(dir) = std::env::current_dir() {
                bases.push(dir);
            }
        }
        bases
    }

    /// Returns the ordered candidate paths tried for `term`.
    ///
    /// An absolute term yields itself as the only candidate; an empty term
    /// yields none.
    #[must_use]
    pub fn candidates(&self, term: &str) -> Vec<PathBuf> {
        if term.is_empty() {
            return Vec::new();
        }
        let term_path = Path::new(term);
        if term_path.is_absolute() {
            return vec![term_path.to_path_buf()];
        }

        let mut seen = HashSet::new();
        let mut paths = Vec::new();
        for base in self.search_bases() {
            if let Some(subdir) = &self.subdir {
                Self::push_unique(&mut paths, &mut seen, base.join(subdir).join(term_path));
            }
            Self::push_unique(&mut paths, &mut seen, base.join(term_path));
        }
        paths
    }

    /// Returns the candidates for `term` as [`Utf8PathBuf`] values.
    ///
    /// Paths that cannot be represented as UTF-8 are omitted.
    #[must_use]
    pub fn utf8_candidates(&self, term: &str) -> Vec<Utf8PathBuf> {
        self.candidates(term)
            .into_iter()
            .filter_map(|path| Utf8PathBuf::from_path_buf(path).ok())
            .collect()
    }

    /// Resolves `term` to the first candidate that is an existing regular
    /// file.
    #[must_use]
    pub fn resolve(&self, term: &str) -> Option<PathBuf> {
        self.candidates(term).into_iter().find(|path| path.is_file())
    }
}
