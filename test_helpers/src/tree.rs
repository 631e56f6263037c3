//! Temporary directory trees populated with configuration files.
//!
//! Files are written through a capability handle on the temporary root, so
//! helpers cannot escape the tree even when handed a `..` path.
//!
//! # Examples
//!
//! ```
//! use test_helpers::tree::FileTree;
//!
//! # fn main() -> anyhow::Result<()> {
//! let tree = FileTree::new()?;
//! let path = tree.write("role/files/app.ini", "[db]\nHost = localhost\n")?;
//! assert!(path.is_file());
//! # Ok(())
//! # }
//! ```

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow};
use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir as Utf8Dir};
use parking_lot::{Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);

/// A temporary directory removed when dropped.
#[derive(Debug)]
pub struct FileTree {
    temp: TempDir,
    root: Utf8Dir,
}

impl FileTree {
    /// Creates an empty tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created or is
    /// not valid UTF-8.
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("create temporary directory")?;
        let utf8 = Utf8Path::from_path(temp.path()).ok_or_else(|| {
            anyhow!(
                "temporary directory path is not valid UTF-8: {}",
                temp.path().display()
            )
        })?;
        let root = Utf8Dir::open_ambient_dir(utf8, ambient_authority())
            .context("open temporary directory with cap-std")?;
        Ok(Self { temp, root })
    }

    /// Absolute path of the tree root.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Absolute path of `relative` inside the tree.
    #[must_use]
    pub fn join(&self, relative: &str) -> PathBuf {
        self.temp.path().join(relative)
    }

    /// Creates `relative` and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create_dir(&self, relative: &str) -> Result<PathBuf> {
        self.root
            .create_dir_all(relative)
            .with_context(|| format!("create directory {relative}"))?;
        Ok(self.join(relative))
    }

    /// Writes `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if a parent directory or the file cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> Result<PathBuf> {
        self.write_bytes(relative, contents.as_bytes())
    }

    /// Writes raw bytes to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if a parent directory or the file cannot be written.
    pub fn write_bytes(&self, relative: &str, contents: &[u8]) -> Result<PathBuf> {
        if let Some(parent) = Utf8Path::new(relative)
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
        {
            self.root
                .create_dir_all(parent)
                .with_context(|| format!("create parent of {relative}"))?;
        }
        let mut file = self
            .root
            .create(relative)
            .with_context(|| format!("create {relative}"))?;
        file.write_all(contents)
            .with_context(|| format!("write {relative}"))?;
        Ok(self.join(relative))
    }

    /// Makes the tree root the process working directory until the returned
    /// guard is dropped.
    ///
    /// The guard borrows the tree, so the directory cannot be removed while
    /// it is still the working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be read or the tree
    /// root cannot be entered.
    pub fn enter(&self) -> Result<Entered<'_>> {
        let lock = CWD_LOCK.lock();
        let previous = std::env::current_dir().context("read current dir")?;
        std::env::set_current_dir(self.path())
            .with_context(|| format!("enter {}", self.path().display()))?;
        Ok(Entered {
            previous,
            _tree: self,
            _lock: lock,
        })
    }
}

/// Working-directory guard returned by [`FileTree::enter`].
#[must_use = "dropping restores the prior working directory"]
#[derive(Debug)]
pub struct Entered<'tree> {
    previous: PathBuf,
    _tree: &'tree FileTree,
    _lock: MutexGuard<'static, ()>,
}

impl Drop for Entered<'_> {
    fn drop(&mut self) {
        // Nothing to report to from `drop`.
        let _unused = std::env::set_current_dir(&self.previous);
    }
}
