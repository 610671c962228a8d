//! Status command implementation.

use anyhow::{Result, bail};
use haverview_lib::prelude::*;

/// Report whether the key is set and the API accepts it.
pub(crate) async fn status(haver: &Haver) -> Result<()> {
    println!("API:       {}", haver.base_url());
    println!(
        "API key:   {}",
        if haver.has_api_key() { "set" } else { "missing" }
    );

    if haver.is_connected().await {
        println!("Status:    connected");
        Ok(())
    } else {
        println!("Status:    not connected");
        bail!("Haver API is not reachable with the current key")
    }
}
