//! Adapter exposing the lookup under a generic host plugin contract.
//!
//! Automation hosts call lookups with positional terms and the variables of
//! the unit being executed, and expect plain data back. [`IterateIni`]
//! derives its search directories from those variables and returns each
//! record as a JSON object.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use crate::diagnostics::{Diagnostics, NoopDiagnostics};
use crate::error::{LookupError, LookupResult};
use crate::ini::ParseOptions;
use crate::locator::SearchContext;
use crate::lookup::IniLookup;

/// Variables supplied by the host for the current execution context.
pub type HostVariables = BTreeMap<String, Value>;

/// Host variables consulted for base directories, in priority order.
pub const SEARCH_VARIABLES: [&str; 2] = ["role_path", "playbook_dir"];

/// Contract a host uses to invoke a lookup plugin.
pub trait LookupPlugin {
    /// Name the plugin is registered under.
    fn name(&self) -> &str;

    /// Runs the lookup for `terms` in the context described by `variables`.
    ///
    /// # Errors
    ///
    /// Implementations return the first error encountered; hosts treat it
    /// as fatal for the task.
    fn run(&self, terms: &[String], variables: &HostVariables) -> LookupResult<Vec<Value>>;
}

/// The `iterate_ini` lookup plugin.
///
/// # Examples
///
/// ```rust,no_run
/// use iterate_ini::host::{HostVariables, IterateIni, LookupPlugin};
///
/// # fn run() -> iterate_ini::LookupResult<()> {
/// let mut vars = HostVariables::new();
/// vars.insert("playbook_dir".into(), "/srv/playbooks".into());
/// let rows = IterateIni::default().run(&["app.ini".to_owned()], &vars)?;
/// for row in rows {
///     println!("{}", row["option"]);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IterateIni {
    extra_dirs: Vec<PathBuf>,
    options: ParseOptions,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for IterateIni {
    fn default() -> Self {
        Self {
            extra_dirs: Vec::new(),
            options: ParseOptions::default(),
            diagnostics: Arc::new(NoopDiagnostics),
        }
    }
}

impl IterateIni {
    /// Registered plugin name.
    pub const NAME: &'static str = "iterate_ini";

    /// Adds a base directory searched after those taken from host variables.
    #[must_use]
    pub fn add_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.extra_dirs.push(dir.into());
        self
    }

    /// Replaces the parse options.
    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the diagnostics sink.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Builds the search context for one invocation.
    ///
    /// String values of [`SEARCH_VARIABLES`] come first, then the plugin's
    /// own extra directories. Other value types are ignored.
    #[must_use]
    pub fn search_context(&self, variables: &HostVariables) -> SearchContext {
        let from_host = SEARCH_VARIABLES
            .iter()
            .filter_map(|key| variables.get(*key).and_then(Value::as_str))
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        SearchContext::builder()
            .base_dirs(from_host.chain(self.extra_dirs.iter().cloned()))
            .build()
    }
}

impl LookupPlugin for IterateIni {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&self, terms: &[String], variables: &HostVariables) -> LookupResult<Vec<Value>> {
        let records = IniLookup::new(self.search_context(variables))
            .with_options(self.options.clone())
            .with_diagnostics(Arc::clone(&self.diagnostics))
            .run(terms)?;
        records
            .iter()
            .map(|record| serde_json::to_value(record).map_err(LookupError::from))
            .collect()
    }
}
