//! Geography lookup table for the haverview Haver Analytics client.
//!
//! Haver identifies countries and regions with its own numeric geography
//! codes (e.g., "111" for the United States). This crate maps them to ISO
//! alpha-2 codes and names. The mapping is bundled with the crate and never
//! changes at runtime.
//!
//! # Example
//!
//! ```
//! use haverview_countries::CountryTable;
//!
//! let table = CountryTable::global();
//!
//! if let Some(country) = table.get("111") {
//!     println!("{}: {}", country.alpha2(), country.name());
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/haverview/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use haverview_types::{Country, HaverError};

/// The geography mapping JSON embedded at compile time.
const COUNTRIES_JSON: &str = include_str!("../data/countries.json");

/// Global country table instance.
static TABLE: OnceLock<Arc<CountryTable>> = OnceLock::new();

/// Immutable map from Haver geography code to [`Country`].
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    countries: HashMap<String, Country>,
}

impl CountryTable {
    /// Returns the bundled country table.
    ///
    /// The table is parsed lazily on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        Self::shared_ref()
    }

    /// Returns a shared handle to the bundled country table.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(Self::shared_ref())
    }

    fn shared_ref() -> &'static Arc<Self> {
        TABLE.get_or_init(|| Arc::new(Self::load()))
    }

    /// Loads the bundled mapping.
    fn load() -> Self {
        Self::from_json(COUNTRIES_JSON).expect("Invalid countries.json")
    }

    /// Parses a mapping of the form `{"111": {"alpha2": "US", "name": "United States"}}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not have that shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let countries: HashMap<String, Country> = serde_json::from_str(json)?;
        Ok(Self { countries })
    }

    /// Looks up a geography code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Country> {
        self.countries.get(code)
    }

    /// Looks up a geography code, failing on an unknown one.
    ///
    /// # Errors
    ///
    /// Returns [`HaverError::UnknownGeography`] if the code is not in the table.
    pub fn lookup(&self, code: &str) -> Result<&Country, HaverError> {
        self.get(code)
            .ok_or_else(|| HaverError::UnknownGeography(code.to_string()))
    }

    /// Returns the total number of geographies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// Returns true if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Returns all geography codes sorted.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.countries.keys().map(String::as_str).collect();
        codes.sort();
        codes
    }
}

impl FromIterator<(String, Country)> for CountryTable {
    fn from_iter<I: IntoIterator<Item = (String, Country)>>(iter: I) -> Self {
        Self {
            countries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_loads() {
        let table = CountryTable::global();
        assert!(!table.is_empty());
    }

    #[test]
    fn test_get_united_states() {
        let table = CountryTable::global();
        let us = table.get("111").expect("111 should exist");
        assert_eq!(us.alpha2(), "US");
        assert_eq!(us.name(), "United States");
    }

    #[test]
    fn test_lookup_unknown() {
        let table = CountryTable::global();
        let err = table.lookup("000").unwrap_err();
        assert!(matches!(err, HaverError::UnknownGeography(code) if code == "000"));
    }

    #[test]
    fn test_alpha2_codes_are_unique() {
        let table = CountryTable::global();
        let mut seen = std::collections::HashSet::new();
        for code in table.codes() {
            let alpha2 = table.get(code).unwrap().alpha2();
            assert!(seen.insert(alpha2), "duplicate alpha2 {alpha2}");
        }
    }

    #[test]
    fn test_shared_is_global() {
        let shared = CountryTable::shared();
        assert!(std::ptr::eq(shared.as_ref(), CountryTable::global()));
    }

    #[test]
    fn test_from_json() {
        let table =
            CountryTable::from_json(r#"{"999": {"alpha2": "XX", "name": "Testland"}}"#).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.codes(), vec!["999"]);
        assert!(CountryTable::from_json("[]").is_err());
    }
}
