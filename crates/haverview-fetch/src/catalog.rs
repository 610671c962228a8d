//! Catalog endpoints: databases, search and recessions.

use std::collections::BTreeMap;

use haverview_types::{DatabaseInfo, HaverError, Page, RecordTable, Result, SeriesInfo};
use serde_json::{Map, Value};

use crate::{Haver, url};

/// Page size of the database and recession listings.
pub const CATALOG_PAGE_SIZE: usize = 1000;

impl Haver {
    /// Lists all databases as a map of name to description.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response lacks the
    /// expected fields.
    pub async fn databases(&self) -> Result<BTreeMap<String, String>> {
        let page: Page<DatabaseInfo> = self
            .get_json(url::databases(self.base_url(), CATALOG_PAGE_SIZE))
            .await?;
        Ok(page
            .data
            .into_iter()
            .map(|db| (db.name, db.description))
            .collect())
    }

    /// Returns the first record of a database's series listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the response lacks the expected
    /// fields, or the database has no series.
    pub async fn database_info(&self, database: &str) -> Result<SeriesInfo> {
        require("database", database)?;
        let url = url::database_info(self.base_url(), database);
        let endpoint = url.path().to_string();
        let page: Page<SeriesInfo> = self.get_json(url).await?;
        page.data
            .into_iter()
            .next()
            .ok_or(HaverError::EmptyResponse { endpoint })
    }

    /// Searches series by keyword, returning the response unmodified.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn search(&self, query: &str) -> Result<Value> {
        require("query", query)?;
        self.get_json(url::search(self.base_url(), query)).await
    }

    /// Lists recessions with their dates and country, without the API's
    /// `index` column.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no `data`
    /// array of objects.
    pub async fn recessions(&self) -> Result<RecordTable> {
        let page: Page<Map<String, Value>> = self
            .get_json(url::recessions(self.base_url(), CATALOG_PAGE_SIZE))
            .await?;
        let mut table = RecordTable::from_records(page.data);
        table.drop_column("index");
        Ok(table)
    }
}

/// Rejects an empty string argument.
pub(crate) fn require(name: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HaverError::invalid_argument(name, "must not be empty"));
    }
    Ok(())
}
