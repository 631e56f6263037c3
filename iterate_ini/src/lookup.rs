//! The lookup itself: resolve each term, flatten it, concatenate.

use std::sync::Arc;

use crate::diagnostics::{Diagnostics, NoopDiagnostics};
use crate::error::{LookupResult, not_found};
use crate::flatten::flatten_with;
use crate::ini::ParseOptions;
use crate::locator::SearchContext;
use crate::record::ConfigRecord;

/// A configured lookup.
///
/// Each call to [`IniLookup::run`] processes its terms strictly in order and
/// stops at the first failure; callers never see partial output.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use iterate_ini::{IniLookup, SearchContext, TracingDiagnostics};
///
/// # fn run() -> iterate_ini::LookupResult<()> {
/// let lookup = IniLookup::new(SearchContext::from_dirs(["roles/web"]))
///     .with_diagnostics(Arc::new(TracingDiagnostics));
/// let records = lookup.run(["app.ini", "db.ini"])?;
/// # let _ = records;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IniLookup {
    context: SearchContext,
    options: ParseOptions,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Default for IniLookup {
    fn default() -> Self {
        Self::new(SearchContext::default())
    }
}

impl IniLookup {
    /// Creates a lookup over `context` with default parse options and no
    /// diagnostics.
    #[must_use]
    pub fn new(context: SearchContext) -> Self {
        Self {
            context,
            options: ParseOptions::default(),
            diagnostics: Arc::new(NoopDiagnostics),
        }
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

    /// Search context used to resolve terms.
    #[must_use]
    pub const fn context(&self) -> &SearchContext {
        &self.context
    }

    /// Parse options applied to every file.
    #[must_use]
    pub const fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Resolves and flattens every term, concatenating the records in term
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`](crate::LookupError::NotFound) for
    /// the first term that does not resolve, or the read/parse error of the
    /// first file that fails to flatten. Remaining terms are not processed.
    pub fn run<I, S>(&self, terms: I) -> LookupResult<Vec<ConfigRecord>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records = Vec::new();
        for term in terms {
            records.extend(self.run_term(term.as_ref())?);
        }
        Ok(records)
    }

    fn run_term(&self, term: &str) -> LookupResult<Vec<ConfigRecord>> {
        self.diagnostics.term_received(term);
        let path = self.context.resolve(term).ok_or_else(|| not_found(term))?;
        self.diagnostics.file_resolved(term, &path);
        flatten_with(&path, &self.options)
    }
}

/// Resolves and flattens `terms` against `context` with default options.
///
/// # Errors
///
/// See [`IniLookup::run`].
pub fn run<I, S>(terms: I, context: &SearchContext) -> LookupResult<Vec<ConfigRecord>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    IniLookup::new(context.clone()).run(terms)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::{Result, anyhow, ensure};
    use rstest::{fixture, rstest};
    use test_helpers::tree::FileTree;

    use super::*;
    use crate::LookupError;
    use crate::diagnostics::recording::{Event, RecordingDiagnostics};

    struct Fixture {
        files: FileTree,
        context: SearchContext,
    }

    #[fixture]
    fn role() -> Result<Fixture> {
        let files = FileTree::new()?;
        files.write("role/files/db.ini", "[db]\nHost = localhost\nPort = 5432\n")?;
        files.write("role/files/cache.ini", "[cache]\nTTL = 60\n")?;
        files.write("role/files/broken.ini", "orphan_option = 1\n")?;
        let context = SearchContext::from_dirs([files.join("role")]);
        Ok(Fixture { files, context })
    }

    #[rstest]
    fn concatenates_in_term_order(role: Result<Fixture>) -> Result<()> {
        let fx = role?;
        let records = run(["cache.ini", "db.ini"], &fx.context).map_err(|err| anyhow!(err))?;
        ensure!(
            records
                == vec![
                    ConfigRecord::new("cache", "TTL", "60"),
                    ConfigRecord::new("db", "Host", "localhost"),
                    ConfigRecord::new("db", "Port", "5432"),
                ],
            "unexpected records: {records:?}"
        );
        Ok(())
    }

    #[rstest]
    fn repeated_terms_are_not_deduplicated(role: Result<Fixture>) -> Result<()> {
        let fx = role?;
        let records = run(["cache.ini", "cache.ini"], &fx.context).map_err(|err| anyhow!(err))?;
        ensure!(records.len() == 2, "expected both copies, got {records:?}");
        Ok(())
    }

    #[rstest]
    fn empty_terms_yield_nothing(role: Result<Fixture>) -> Result<()> {
        let fx = role?;
        let records = run(Vec::<String>::new(), &fx.context).map_err(|err| anyhow!(err))?;
        ensure!(records.is_empty(), "expected no records");
        Ok(())
    }

    #[rstest]
    fn missing_term_aborts_whole_call(role: Result<Fixture>) -> Result<()> {
        let fx = role?;
        let Err(err) = run(["db.ini", "does-not-exist", "cache.ini"], &fx.context) else {
            return Err(anyhow!("expected lookup to fail"));
        };
        ensure!(
            matches!(&err, LookupError::NotFound { term } if term == "does-not-exist"),
            "unexpected error {err:?}"
        );
        ensure!(
            err.to_string().contains("does-not-exist"),
            "message must name the term"
        );
        Ok(())
    }

    #[rstest]
    fn parse_failure_aborts_whole_call(role: Result<Fixture>) -> Result<()> {
        let fx = role?;
        let Err(err) = run(["db.ini", "broken.ini"], &fx.context) else {
            return Err(anyhow!("expected lookup to fail"));
        };
        ensure!(err.is_parse(), "unexpected error {err:?}");
        ensure!(
            err.path() == Some(fx.files.join("role/files/broken.ini").as_path()),
            "error must name the file"
        );
        Ok(())
    }

    #[rstest]
    fn emits_two_events_per_term(role: Result<Fixture>) -> Result<()> {
        let fx = role?;
        let recorder = Arc::new(RecordingDiagnostics::default());
        let lookup = IniLookup::new(fx.context.clone()).with_diagnostics(recorder.clone());
        lookup.run(["db.ini", "cache.ini"]).map_err(|err| anyhow!(err))?;
        ensure!(
            recorder.events()
                == vec![
                    Event::Term(String::from("db.ini")),
                    Event::Resolved(String::from("db.ini"), fx.files.join("role/files/db.ini")),
                    Event::Term(String::from("cache.ini")),
                    Event::Resolved(
                        String::from("cache.ini"),
                        fx.files.join("role/files/cache.ini")
                    ),
                ],
            "unexpected events: {:?}",
            recorder.events()
        );
        Ok(())
    }

    #[rstest]
    fn unresolved_term_only_reports_receipt(role: Result<Fixture>) -> Result<()> {
        let fx = role?;
        let recorder = Arc::new(RecordingDiagnostics::default());
        let lookup = IniLookup::new(fx.context.clone()).with_diagnostics(recorder.clone());
        ensure!(lookup.run(["nope.ini"]).is_err(), "expected failure");
        ensure!(
            recorder.events() == vec![Event::Term(String::from("nope.ini"))],
            "unexpected events: {:?}",
            recorder.events()
        );
        Ok(())
    }

    #[rstest]
    fn configured_options_apply_to_every_file(role: Result<Fixture>) -> Result<()> {
        let fx = role?;
        fx.files
            .write("role/files/inherit.ini", "[DEFAULT]\nUser = ops\n[web]\nPort = 80\n")?;
        let lookup = IniLookup::new(fx.context.clone())
            .with_options(ParseOptions::new().with_default_section("DEFAULT"));
        let records = lookup.run(["inherit.ini"]).map_err(|err| anyhow!(err))?;
        ensure!(
            records
                == vec![
                    ConfigRecord::new("web", "User", "ops"),
                    ConfigRecord::new("web", "Port", "80"),
                ],
            "unexpected records: {records:?}"
        );
        Ok(())
    }
}
