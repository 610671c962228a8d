//! Haver View endpoint construction.
//!
//! Path segments and query values are percent-encoded, so database and
//! series codes can be passed through as given.

use reqwest::Url;

/// Base URL of the Haver View API.
pub const BASE_URL: &str = "https://api.haverview.com";

/// API version prefix of every endpoint.
pub const API_VERSION: &str = "v4";

/// Builds `{base}/v4/{segments...}`.
fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().push(API_VERSION).extend(segments);
    }
    url
}

fn with_query(mut url: Url, pairs: &[(&str, &str)]) -> Url {
    url.query_pairs_mut().extend_pairs(pairs);
    url
}

/// Health probe endpoint.
#[must_use]
pub fn docs(base: &Url) -> Url {
    endpoint(base, &["docs"])
}

/// Database listing.
#[must_use]
pub fn databases(base: &Url, per_page: usize) -> Url {
    let per_page = per_page.to_string();
    with_query(
        endpoint(base, &["database"]),
        &[("per_page", per_page.as_str())],
    )
}

/// First record of a database's series listing.
#[must_use]
pub fn database_info(base: &Url, database: &str) -> Url {
    series_page(base, database, None, 1)
}

/// One page of a database's series listing.
///
/// # Example
///
/// ```
/// use haverview_fetch::url::series_page;
/// use reqwest::Url;
///
/// let base = Url::parse("https://api.haverview.com").unwrap();
/// let url = series_page(&base, "USECON", Some("GDP"), 1000);
/// assert_eq!(
///     url.as_str(),
///     "https://api.haverview.com/v4/database/USECON/series?page=GDP&per_page=1000"
/// );
/// ```
#[must_use]
pub fn series_page(base: &Url, database: &str, cursor: Option<&str>, per_page: usize) -> Url {
    let url = endpoint(base, &["database", database, "series"]);
    let per_page = per_page.to_string();
    match cursor {
        Some(cursor) => with_query(url, &[("page", cursor), ("per_page", per_page.as_str())]),
        None => with_query(url, &[("per_page", per_page.as_str())]),
    }
}

/// Full-text search.
#[must_use]
pub fn search(base: &Url, query: &str) -> Url {
    with_query(endpoint(base, &["data", "search"]), &[("query", query)])
}

/// Recessions listing.
#[must_use]
pub fn recessions(base: &Url, per_page: usize) -> Url {
    let per_page = per_page.to_string();
    with_query(
        endpoint(base, &["data", "recessions"]),
        &[("per_page", per_page.as_str())],
    )
}

/// Single series with its observations.
#[must_use]
pub fn series(base: &Url, database: &str, series: &str) -> Url {
    endpoint(base, &["database", database, "series", series])
}
