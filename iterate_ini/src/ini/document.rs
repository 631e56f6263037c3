//! Ordered in-memory representation of a parsed document.

use std::collections::HashMap;

use crate::record::ConfigRecord;

use super::options::ParseOptions;
use super::parser::{self, SyntaxError};

/// A named group of options, kept in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    options: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Section {
    pub(super) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Section name exactly as written between the brackets.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value assigned to `option`, matching case-sensitively.
    #[must_use]
    pub fn get(&self, option: &str) -> Option<&str> {
        self.index
            .get(option)
            .and_then(|&slot| self.options.get(slot))
            .map(|(_, value)| value.as_str())
    }

    /// Iterates options in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options
            .iter()
            .map(|(option, value)| (option.as_str(), value.as_str()))
    }

    /// Number of distinct options in the section.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the section holds no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Assigns `value` to `option`, returning its slot and whether it
    /// already existed. Existing options keep their slot.
    pub(super) fn set(&mut self, option: &str, value: &str) -> (usize, bool) {
        if let Some(&slot) = self.index.get(option) {
            if let Some(entry) = self.options.get_mut(slot) {
                value.clone_into(&mut entry.1);
            }
            return (slot, true);
        }
        let slot = self.options.len();
        self.options.push((option.to_owned(), value.to_owned()));
        self.index.insert(option.to_owned(), slot);
        (slot, false)
    }

    /// Appends a continuation line to the value in `slot`.
    pub(super) fn continue_value(&mut self, slot: usize, line: &str) {
        if let Some((_, value)) = self.options.get_mut(slot) {
            value.push('\n');
            value.push_str(line);
        }
    }
}

/// A parsed document: sections in declaration order plus an optional
/// inherited default section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    pub(super) sections: Vec<Section>,
    pub(super) index: HashMap<String, usize>,
    pub(super) defaults: Option<Section>,
}

impl IniDocument {
    /// Parses `text` according to `options`.
    ///
    /// # Examples
    ///
    /// ```
    /// use iterate_ini::{IniDocument, ParseOptions};
    ///
    /// let doc = IniDocument::parse("[db]\nHost = localhost\n", &ParseOptions::default())?;
    /// assert_eq!(doc.section("db").and_then(|s| s.get("Host")), Some("localhost"));
    /// # Ok::<(), iterate_ini::SyntaxError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] describing the first malformed line.
    pub fn parse(text: &str, options: &ParseOptions) -> Result<Self, SyntaxError> {
        parser::parse(text, options)
    }

    /// Iterates sections in declaration order, excluding the default section.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Looks up a section by its exact name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.index
            .get(name)
            .and_then(|&slot| self.sections.get(slot))
    }

    /// The inherited default section, when one was configured and present.
    #[must_use]
    pub const fn defaults(&self) -> Option<&Section> {
        self.defaults.as_ref()
    }

    /// Flattens the document into records.
    ///
    /// Sections are visited in declaration order. Inherited defaults come
    /// first within each section, taking the section's value when it
    /// overrides them, followed by the section's own remaining options.
    #[must_use]
    pub fn records(&self) -> Vec<ConfigRecord> {
        let mut records = Vec::new();
        for section in &self.sections {
            if let Some(defaults) = &self.defaults {
                for (option, fallback) in defaults.iter() {
                    let value = section.get(option).unwrap_or(fallback);
                    records.push(ConfigRecord::new(section.name(), option, value));
                }
            }
            for (option, value) in section.iter() {
                if self
                    .defaults
                    .as_ref()
                    .is_some_and(|defaults| defaults.get(option).is_some())
                {
                    continue;
                }
                records.push(ConfigRecord::new(section.name(), option, value));
            }
        }
        records
    }
}
