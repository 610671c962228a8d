//! Typed records returned by the Haver API.
//!
//! Every record keeps the fields it does not model in an `extra` map, so
//! callers asking for full detail see everything the API sent.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Envelope of every listing endpoint: `{"data": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records of this page, in server order.
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// Returns the number of records in the page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the page holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// One entry of the database listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    /// Database code (e.g., "USECON").
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Remaining fields sent by the API.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of a database's series listing.
///
/// Besides name and description the API sends fields such as
/// `databaseName`, `frequency`, `dataPointCount`, `geography` or
/// `startDate`; those live in [`SeriesInfo::extra`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesInfo {
    /// Series code (e.g., "GDP").
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Remaining fields sent by the API.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SeriesInfo {
    /// Returns an extra field by its API name.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// A single observation of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Observation date.
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    /// Observed value; `None` for a missing observation.
    #[serde(rename = "nSeriesData")]
    pub value: Option<f64>,
}

/// The full record of a single series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesData {
    /// Series code.
    pub name: String,
    /// Haver geography code (e.g., "111" for the United States).
    pub geography: String,
    /// Observations in server order.
    #[serde(rename = "dataPoints")]
    pub data_points: Vec<DataPoint>,
    /// Remaining fields sent by the API.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SeriesData {
    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data_points.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data_points.is_empty()
    }
}

/// Accepts `YYYY-MM-DD` with an optional time suffix.
fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let day = raw.split(['T', ' ']).next().unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_data_decode() {
        let json = r#"{
            "name": "N997CE",
            "geography": "997",
            "frequency": "Q",
            "dataPoints": [
                {"date": "2020-01-01", "nSeriesData": 1.5},
                {"date": "2020-04-01T00:00:00", "nSeriesData": null}
            ]
        }"#;
        let data: SeriesData = serde_json::from_str(json).unwrap();

        assert_eq!(data.name, "N997CE");
        assert_eq!(data.len(), 2);
        assert_eq!(
            data.data_points[1].date,
            NaiveDate::from_ymd_opt(2020, 4, 1).unwrap()
        );
        assert_eq!(data.data_points[1].value, None);
        assert_eq!(data.extra.get("frequency"), Some(&Value::from("Q")));
    }

    #[test]
    fn test_missing_geography_is_error() {
        let json = r#"{"name": "N997CE", "dataPoints": []}"#;
        let err = serde_json::from_str::<SeriesData>(json).unwrap_err();
        assert!(err.to_string().contains("geography"));
    }

    #[test]
    fn test_bad_date_is_error() {
        let json = r#"{"date": "Q1 2020", "nSeriesData": 1.0}"#;
        assert!(serde_json::from_str::<DataPoint>(json).is_err());
    }

    #[test]
    fn test_series_info_keeps_extra_fields() {
        let json = r#"{"data": [
            {"name": "GDP", "description": "Gross Domestic Product", "frequency": "Q"}
        ]}"#;
        let page: Page<SeriesInfo> = serde_json::from_str(json).unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page.data[0].field("frequency"), Some(&Value::from("Q")));

        let round = serde_json::to_value(&page.data[0]).unwrap();
        assert_eq!(round["frequency"], "Q");
        assert_eq!(round["name"], "GDP");
    }
}
