//! HTTP client and API operations for the haverview Haver Analytics client.
//!
//! This crate talks to the Haver View REST API:
//!
//! - [`Haver`] - Connection manager holding the key and request options
//! - [`url`] - Endpoint construction
//! - [`Haver::databases`], [`Haver::database_info`], [`Haver::search`],
//!   [`Haver::recessions`] - Catalog operations
//! - [`Haver::series`] - Paginated, cached series listing
//! - [`Haver::read`], [`Haver::read_table`] - Series reads and the flat
//!   series table
//! - [`Transport`] - Seam between the client and the HTTP stack

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/haverview/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cache;
mod catalog;
mod client;
mod config;
mod listing;
mod table;
mod transport;
pub mod url;

#[cfg(test)]
mod test_utils;

pub use cache::{CacheKey, SeriesCache};
pub use catalog::CATALOG_PAGE_SIZE;
pub use client::Haver;
pub use config::{API_KEY_ENV, API_KEY_HEADER, ClientConfig, RequestOptions, resolve_api_key};
pub use listing::{SERIES_PAGE_SIZE, SeriesListing};
pub use table::SeriesTableBuilder;
pub use transport::{HttpTransport, Response, Transport, TransportError};
