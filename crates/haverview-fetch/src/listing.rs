//! Paginated series listing.
//!
//! The listing endpoint pages by cursor: `page` names a series and the
//! server answers with up to `per_page` records starting *at* that series.
//! Walking the whole database therefore re-sends the last record of each
//! full page as the first record of the next one.

use std::collections::BTreeMap;

use haverview_types::{Page, Result, SeriesInfo};
use tracing::debug;

use crate::catalog::require;
use crate::{Haver, url};

/// Maximum records per listing page.
pub const SERIES_PAGE_SIZE: usize = 1000;

/// Output of [`Haver::series`].
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesListing {
    /// Series name to description. A name listed twice keeps its last
    /// description.
    Names(BTreeMap<String, String>),
    /// Every record with all fields, in server order.
    Full(Vec<SeriesInfo>),
}

impl SeriesListing {
    fn shape(records: Vec<SeriesInfo>, full_info: bool) -> Self {
        if full_info {
            Self::Full(records)
        } else {
            Self::Names(
                records
                    .into_iter()
                    .map(|s| (s.name, s.description))
                    .collect(),
            )
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Names(names) => names.len(),
            Self::Full(records) => records.len(),
        }
    }

    /// Returns true if the listing is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if a series of that name is listed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Self::Names(names) => names.contains_key(name),
            Self::Full(records) => records.iter().any(|s| s.name == name),
        }
    }

    /// Returns the series names: sorted for [`SeriesListing::Names`], in
    /// server order for [`SeriesListing::Full`].
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Names(names) => names.keys().map(String::as_str).collect(),
            Self::Full(records) => records.iter().map(|s| s.name.as_str()).collect(),
        }
    }
}

/// Appends `page` to `records`, skipping its first record when it repeats
/// the cursor. Returns the number of records appended.
///
/// Only the first record is compared: further records sharing the cursor's
/// name are kept.
pub(crate) fn append_page(
    records: &mut Vec<SeriesInfo>,
    page: Vec<SeriesInfo>,
    cursor: Option<&str>,
) -> usize {
    let skip = match (cursor, page.first()) {
        (Some(cursor), Some(first)) => usize::from(first.name == cursor),
        _ => 0,
    };
    let before = records.len();
    records.extend(page.into_iter().skip(skip));
    records.len() - before
}

impl Haver {
    /// Lists the series of a database.
    ///
    /// Without `like`, walks every page of the listing. With `like`, fetches
    /// the single page starting at the series closest to it; the value does
    /// not have to be an existing series name. A blank `like` counts as
    /// absent.
    ///
    /// Results are cached per `(database, like)` until
    /// [`Haver::clear_cache`] or [`Haver::connect`]; `full_info` only changes
    /// the shape of the output.
    ///
    /// # Errors
    ///
    /// Returns an error if a request fails or a page lacks the expected
    /// fields. Pages fetched before the failure are discarded.
    pub async fn series(
        &self,
        database: &str,
        like: Option<&str>,
        full_info: bool,
    ) -> Result<SeriesListing> {
        require("database", database)?;
        let like = like.filter(|l| !l.trim().is_empty());

        if let Some(records) = self.cache.get(database, like) {
            debug!(database, like, "series listing served from cache");
            return Ok(SeriesListing::shape(records, full_info));
        }

        let records = match like {
            Some(cursor) => self.series_page(database, Some(cursor)).await?.data,
            None => self.all_series(database).await?,
        };

        self.cache.insert(database, like, records.clone());
        Ok(SeriesListing::shape(records, full_info))
    }

    /// Drops every cached series listing.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    async fn series_page(&self, database: &str, cursor: Option<&str>) -> Result<Page<SeriesInfo>> {
        self.get_json(url::series_page(
            self.base_url(),
            database,
            cursor,
            SERIES_PAGE_SIZE,
        ))
        .await
    }

    async fn all_series(&self, database: &str) -> Result<Vec<SeriesInfo>> {
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self.series_page(database, cursor.as_deref()).await?;
            let full = page.len() >= SERIES_PAGE_SIZE;
            let added = append_page(&mut records, page.data, cursor.as_deref());
            debug!(database, cursor = cursor.as_deref(), added, "series page");

            // A full page that only echoed the cursor would loop forever
            if !full || added == 0 {
                break;
            }
            cursor = records.last().map(|s| s.name.clone());
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{connected_client, healthy_transport, names, series_page};
    use serde_json::json;

    fn info(name: &str) -> SeriesInfo {
        SeriesInfo {
            name: name.to_string(),
            description: format!("Description of {name}"),
            extra: serde_json::Map::new(),
        }
    }

    const FIRST_PAGE: &str = "/v4/database/USECON/series?per_page=1000";

    fn cursor_page(cursor: &str) -> String {
        format!("/v4/database/USECON/series?page={cursor}&per_page=1000")
    }

    #[test]
    fn test_append_page_drops_cursor_overlap() {
        let mut records = vec![info("A"), info("B")];
        let added = append_page(&mut records, vec![info("B"), info("C")], Some("B"));
        assert_eq!(added, 1);
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_append_page_keeps_non_overlapping_first() {
        let mut records = vec![info("A")];
        let added = append_page(&mut records, vec![info("C"), info("D")], Some("B"));
        assert_eq!(added, 2);
    }

    #[test]
    fn test_append_page_drops_only_one_duplicate() {
        let mut records = vec![info("B")];
        let added = append_page(&mut records, vec![info("B"), info("B"), info("C")], Some("B"));
        assert_eq!(added, 2);
    }

    #[tokio::test]
    async fn test_single_page() {
        let transport = healthy_transport();
        transport.route_json(FIRST_PAGE, &series_page(names(0..3)));
        let client = connected_client(transport.clone()).await;

        let listing = client.series("USECON", None, true).await.unwrap();
        assert_eq!(listing.names(), vec!["S0000", "S0001", "S0002"]);
        assert_eq!(transport.data_requests(), vec![FIRST_PAGE]);
    }

    #[tokio::test]
    async fn test_two_full_pages_and_remainder() {
        let transport = healthy_transport();
        transport.route_json(FIRST_PAGE, &series_page(names(0..1000)));
        transport.route_json(&cursor_page("S0999"), &series_page(names(999..1999)));
        transport.route_json(&cursor_page("S1998"), &series_page(names(1998..2050)));
        let client = connected_client(transport.clone()).await;

        let listing = client.series("USECON", None, true).await.unwrap();
        let listed = listing.names();

        assert_eq!(listed.len(), 2050);
        assert_eq!(listed.iter().filter(|n| **n == "S0999").count(), 1);
        assert_eq!(listed.iter().filter(|n| **n == "S1998").count(), 1);
        // Server order is preserved
        assert_eq!(listed[0], "S0000");
        assert_eq!(listed[2049], "S2049");
        assert_eq!(
            transport.data_requests(),
            vec![
                FIRST_PAGE.to_string(),
                cursor_page("S0999"),
                cursor_page("S1998")
            ]
        );
    }

    #[tokio::test]
    async fn test_exact_page_followed_by_echo_only() {
        let transport = healthy_transport();
        transport.route_json(FIRST_PAGE, &series_page(names(0..1000)));
        transport.route_json(&cursor_page("S0999"), &series_page(names(999..1000)));
        let client = connected_client(transport.clone()).await;

        let listing = client.series("USECON", None, false).await.unwrap();
        assert_eq!(listing.len(), 1000);
        assert_eq!(transport.data_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_like_is_single_page_cursor() {
        let transport = healthy_transport();
        transport.route_json(&cursor_page("GDP"), &series_page(names(0..1000)));
        let client = connected_client(transport.clone()).await;

        let listing = client.series("USECON", Some("GDP"), false).await.unwrap();
        assert_eq!(listing.len(), 1000);
        // A full page does not trigger pagination when searching
        assert_eq!(transport.data_requests(), vec![cursor_page("GDP")]);
    }

    #[tokio::test]
    async fn test_blank_like_walks_whole_listing() {
        let transport = healthy_transport();
        transport.route_json(FIRST_PAGE, &series_page(names(0..3)));
        let client = connected_client(transport.clone()).await;

        let blank = client.series("USECON", Some(""), false).await.unwrap();
        let spaces = client.series("USECON", Some("  "), false).await.unwrap();
        let absent = client.series("USECON", None, false).await.unwrap();

        assert_eq!(blank.len(), 3);
        assert_eq!(blank, spaces);
        assert_eq!(blank, absent);
        // All three share the cache entry of the unfiltered listing
        assert_eq!(transport.data_requests(), vec![FIRST_PAGE]);
    }

    #[tokio::test]
    async fn test_names_last_write_wins() {
        let transport = healthy_transport();
        transport.route_json(
            FIRST_PAGE,
            &json!({"data": [
                {"name": "GDP", "description": "first"},
                {"name": "GDP", "description": "second"}
            ]}),
        );
        let client = connected_client(transport).await;

        match client.series("USECON", None, false).await.unwrap() {
            SeriesListing::Names(names) => {
                assert_eq!(names.len(), 1);
                assert_eq!(names["GDP"], "second");
            }
            SeriesListing::Full(_) => panic!("expected names"),
        }
    }

    #[tokio::test]
    async fn test_cache_hit_makes_no_request() {
        let transport = healthy_transport();
        transport.route_json(FIRST_PAGE, &series_page(names(0..5)));
        let client = connected_client(transport.clone()).await;

        let first = client.series("USECON", None, true).await.unwrap();
        let second = client.series("USECON", None, true).await.unwrap();
        let names_only = client.series("USECON", None, false).await.unwrap();

        assert_eq!(first, second);
        assert!(names_only.contains("S0004"));
        assert_eq!(transport.data_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_cache_refetches() {
        let transport = healthy_transport();
        transport.route_json(FIRST_PAGE, &series_page(names(0..5)));
        let client = connected_client(transport.clone()).await;

        client.series("USECON", None, false).await.unwrap();
        client.clear_cache();
        client.series("USECON", None, false).await.unwrap();

        assert_eq!(transport.data_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_page_is_not_cached() {
        let transport = healthy_transport();
        transport.route_json(FIRST_PAGE, &series_page(names(0..1000)));
        let client = connected_client(transport.clone()).await;

        // Second page is unrouted: a 404 body without `data`
        assert!(client.series("USECON", None, false).await.is_err());
        assert!(client.cache.is_empty());
    }
}
