//! Single-series reads and the series table builder.

use std::sync::Arc;

use haverview_countries::CountryTable;
use haverview_types::{Result, SeriesCode, SeriesData, SeriesRow, SeriesTable};
use tracing::debug;

use crate::catalog::require;
use crate::{Haver, url};

/// Turns series records into [`SeriesTable`] rows.
#[derive(Debug, Clone)]
pub struct SeriesTableBuilder {
    countries: Arc<CountryTable>,
    table: SeriesTable,
}

impl SeriesTableBuilder {
    /// Creates a builder joining geographies against `countries`.
    #[must_use]
    pub fn new(countries: Arc<CountryTable>) -> Self {
        Self {
            countries,
            table: SeriesTable::new(),
        }
    }

    /// Appends one row per observation of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`haverview_types::HaverError::UnknownGeography`] if the
    /// series' geography is not in the country table; nothing is appended.
    pub fn push(&mut self, data: &SeriesData, database: &str) -> Result<&mut Self> {
        let country = self.countries.lookup(&data.geography)?;
        let variable = data.name.to_lowercase();
        let database = database.to_lowercase();

        self.table.extend(data.data_points.iter().map(|point| SeriesRow {
            date: point.date,
            country: data.geography.clone(),
            country_alpha2: country.alpha2().to_string(),
            country_name: country.name().to_string(),
            database: database.clone(),
            variable: variable.clone(),
            value: point.value,
        }));
        Ok(self)
    }

    /// Returns the table built so far.
    #[must_use]
    pub fn finish(self) -> SeriesTable {
        self.table
    }
}

impl Haver {
    /// Reads one series with all its observations.
    ///
    /// # Errors
    ///
    /// Returns an error if an argument is empty, the request fails, or the
    /// response lacks `name`, `geography` or `dataPoints`.
    pub async fn read(&self, database: &str, series: &str) -> Result<SeriesData> {
        require("database", database)?;
        require("series", series)?;
        self.get_json(url::series(self.base_url(), database, series))
            .await
    }

    /// Reads `SERIES@DATABASE` codes into one table, in the given order.
    ///
    /// Every code is parsed before the first request. Series are fetched one
    /// after another; any failure aborts the batch and returns no rows.
    ///
    /// # Errors
    ///
    /// Returns [`haverview_types::HaverError::InvalidCode`] for a malformed
    /// code, [`haverview_types::HaverError::UnknownGeography`] for a
    /// geography missing from the country table, or any error of
    /// [`Haver::read`].
    ///
    /// Codes are passed as a collection. A single code must be wrapped:
    ///
    /// ```no_run
    /// # async fn run(haver: &haverview_fetch::Haver) -> haverview_types::Result<()> {
    /// let table = haver.read_table(["N997CE@EUDATA"]).await?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// A bare string is rejected at compile time:
    ///
    /// ```compile_fail
    /// # async fn run(haver: &haverview_fetch::Haver) {
    /// let _ = haver.read_table("N997CE@EUDATA").await;
    /// # }
    /// ```
    ///
    /// ```compile_fail
    /// # async fn run(haver: &haverview_fetch::Haver) {
    /// let _ = haver.read_table(String::from("N997CE@EUDATA")).await;
    /// # }
    /// ```
    pub async fn read_table<I, S>(&self, codes: I) -> Result<SeriesTable>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes = codes
            .into_iter()
            .map(|code| code.as_ref().parse::<SeriesCode>())
            .collect::<Result<Vec<_>>>()?;

        let mut builder = SeriesTableBuilder::new(Arc::clone(&self.countries));
        for code in &codes {
            let data = self.read(code.database(), code.series()).await?;
            debug!(code = %code, points = data.len(), "series read");
            builder.push(&data, code.database())?;
        }
        Ok(builder.finish())
    }
}
