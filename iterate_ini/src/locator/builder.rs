//! Builder for [`SearchContext`].
//!
//! Hosts usually know a handful of directories relative to the unit being
//! executed (a role directory, the playbook directory). The builder collects
//! them in priority order and lets callers rename or drop the conventional
//! `files` subdirectory.

use std::path::PathBuf;

use super::{DEFAULT_SUBDIR, SearchContext};

/// Builder for [`SearchContext`].
///
/// # Examples
///
/// ```rust
/// use iterate_ini::SearchContext;
///
/// let context = SearchContext::builder()
///     .add_base_dir("/srv/roles/web")
///     .add_base_dir("/srv/playbooks")
///     .env_var("ITERATE_INI_PATH")
///     .build();
/// assert_eq!(context.base_dirs().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SearchContextBuilder {
    base_dirs: Vec<PathBuf>,
    subdir: Option<String>,
    env_var: Option<String>,
}

impl Default for SearchContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchContextBuilder {
    /// Creates a builder that searches the `files` subdirectory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_dirs: Vec::new(),
            subdir: Some(String::from(DEFAULT_SUBDIR)),
            env_var: None,
        }
    }

    /// Appends a base directory searched after those already added.
    #[must_use]
    pub fn add_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dirs.push(dir.into());
        self
    }

    /// Replaces the base directories.
    #[must_use]
    pub fn base_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.base_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Overrides the subdirectory searched under each base directory.
    #[must_use]
    pub fn subdir(mut self, name: impl Into<String>) -> Self {
        self.subdir = Some(name.into());
        self
    }

    /// Disables the subdirectory search so only `<base>/<term>` is tried.
    #[must_use]
    pub fn without_subdir(mut self) -> Self {
        self.subdir = None;
        self
    }

    /// Names an environment variable holding extra base directories.
    ///
    /// The variable uses the platform path-list syntax and is read each time
    /// candidates are computed. Its directories follow the explicit ones.
    #[must_use]
    pub fn env_var(mut self, env_var: impl Into<String>) -> Self {
        self.env_var = Some(env_var.into());
        self
    }

    /// Finalises the builder.
    #[must_use]
    pub fn build(self) -> SearchContext {
        let subdir = self.subdir.filter(|name| !name.trim().is_empty());
        SearchContext {
            base_dirs: self.base_dirs,
            subdir,
            env_var: self.env_var,
        }
    }
}
