//! Rust client library for the Haver Analytics Haver View API.
//!
//! This is a facade crate that re-exports functionality from the haverview
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use haverview_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let haver = Haver::new(ClientConfig::from_env()).await?;
//!
//!     for (name, description) in haver.databases().await? {
//!         println!("{name}: {description}");
//!     }
//!
//!     let table = haver.read_table(["N997CE@EUDATA", "N025CE@EUDATA"]).await?;
//!     println!("{} observations", table.len());
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/haverview/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use haverview_types::*;

// Re-export the geography table
pub use haverview_countries::CountryTable;

// Re-export the client
#[cfg(feature = "fetch")]
pub use haverview_fetch::{
    API_KEY_ENV, ClientConfig, Haver, HttpTransport, RequestOptions, SeriesCache, SeriesListing,
    SeriesTableBuilder, Transport, TransportError, resolve_api_key, url,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use haverview_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use haverview_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use haverview_lib::prelude::*;
/// ```
pub mod prelude {
    pub use haverview_types::{
        Country, HaverError, RecordTable, Result, SeriesCode, SeriesInfo, SeriesRow, SeriesTable,
    };

    pub use haverview_countries::CountryTable;

    #[cfg(feature = "fetch")]
    pub use haverview_fetch::{ClientConfig, Haver, SeriesListing};

    #[cfg(feature = "format")]
    pub use haverview_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use haverview_format::ParquetFormatter;
}
