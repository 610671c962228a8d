//! Series identifiers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::HaverError;

/// A Haver series identifier of the form `SERIES@DATABASE`.
///
/// # Example
///
/// ```
/// use haverview_types::SeriesCode;
///
/// let code: SeriesCode = "N997CE@EUDATA".parse().unwrap();
/// assert_eq!(code.series(), "N997CE");
/// assert_eq!(code.database(), "EUDATA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesCode {
    series: String,
    database: String,
}

impl SeriesCode {
    /// Creates a code from its parts.
    #[must_use]
    pub fn new(series: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            series: series.into(),
            database: database.into(),
        }
    }

    /// Returns the series part.
    #[must_use]
    pub fn series(&self) -> &str {
        &self.series
    }

    /// Returns the database part.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }
}

impl FromStr for SeriesCode {
    type Err = HaverError;

    /// Splits at the first `@`. Both halves must be non-empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HaverError::InvalidCode { code: s.to_string() };
        let (series, database) = s.split_once('@').ok_or_else(invalid)?;
        if series.is_empty() || database.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(series, database))
    }
}

impl std::fmt::Display for SeriesCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.series, self.database)
    }
}
