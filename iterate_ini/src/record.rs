//! Flattened `{section, option, value}` records.

use serde::Serialize;

/// One option assignment found under one section of a parsed file.
///
/// Records serialise to a JSON object with exactly the keys `section`,
/// `option` and `value`, which is the shape handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConfigRecord {
    /// Section name exactly as written between the brackets.
    pub section: String,
    /// Option name with its original casing.
    pub option: String,
    /// Raw option value with surrounding whitespace trimmed.
    pub value: String,
}

impl ConfigRecord {
    /// Creates a record from its three parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use iterate_ini::ConfigRecord;
    ///
    /// let record = ConfigRecord::new("db", "Host", "localhost");
    /// assert_eq!(record.option, "Host");
    /// ```
    #[must_use]
    pub fn new(
        section: impl Into<String>,
        option: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            option: option.into(),
            value: value.into(),
        }
    }
}
