//! Core types for the haverview Haver Analytics client.
//!
//! This crate provides the data structures shared by the haverview crates:
//!
//! - [`SeriesCode`] - A `SERIES@DATABASE` identifier
//! - [`SeriesInfo`], [`DatabaseInfo`], [`SeriesData`] - Typed API records
//! - [`SeriesTable`] - Flat table of observations with a fixed column order
//! - [`RecordTable`] - Generic table built from an array of JSON objects
//! - [`HaverError`] - Error taxonomy for every client operation

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/haverview/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod code;
mod country;
mod error;
mod record;
mod table;

pub use code::SeriesCode;
pub use country::Country;
pub use error::{HaverError, Result};
pub use record::{DataPoint, DatabaseInfo, Page, SeriesData, SeriesInfo};
pub use table::{RecordTable, SeriesRow, SeriesTable};
