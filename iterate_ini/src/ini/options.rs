//! Knobs controlling how documents are parsed.

/// Parser configuration.
///
/// The default configuration merges duplicate sections and options and has
/// no default section.
///
/// # Examples
///
/// ```
/// use iterate_ini::ParseOptions;
///
/// let options = ParseOptions::new()
///     .with_default_section("DEFAULT")
///     .strict(true);
/// assert_eq!(options.default_section(), Some("DEFAULT"));
/// assert!(options.is_strict());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    default_section: Option<String>,
    strict: bool,
}

impl ParseOptions {
    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_section: None,
            strict: false,
        }
    }

    /// Names a section whose options every other section inherits.
    ///
    /// The named section produces no records of its own.
    #[must_use]
    pub fn with_default_section(mut self, name: impl Into<String>) -> Self {
        self.default_section = Some(name.into());
        self
    }

    /// Rejects duplicate sections and duplicate options instead of merging
    /// them.
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Name of the inherited default section, if configured.
    #[must_use]
    pub fn default_section(&self) -> Option<&str> {
        self.default_section.as_deref()
    }

    /// Whether duplicates are rejected.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }
}
