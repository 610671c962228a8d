//! Output formatters for the haverview Haver Analytics client.
//!
//! This crate writes series tables and generic record tables to:
//!
//! - [`CsvFormatter`] - CSV or TSV format
//! - [`JsonFormatter`] - JSON array or NDJSON format
//! - [`ParquetFormatter`] - Apache Parquet columnar format

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/haverview/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;

#[cfg(feature = "parquet")]
mod parquet;

#[cfg(test)]
mod test_utils;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::{JsonFormatter, JsonStyle};

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetFormatter;
