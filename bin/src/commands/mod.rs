//! CLI command implementations.

pub(crate) mod catalog;
pub(crate) mod read;
pub(crate) mod series;
pub(crate) mod status;

use anyhow::{Context, Result};
use haverview_lib::prelude::*;

/// Builds a client from the environment, preferring an explicit key.
pub(crate) async fn connect(api_key: Option<String>) -> Result<Haver> {
    let mut config = ClientConfig::from_env();
    if let Some(key) = api_key {
        config = config.with_api_key(key);
    }
    Haver::new(config)
        .await
        .context("Failed to create Haver client")
}
