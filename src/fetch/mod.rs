//! HTTP plumbing for the acquisition collaborators.
//!
//! Retry is iterative with a fixed attempt budget; after the last attempt
//! the terminal error is returned and the caller substitutes an explicit
//! unavailable record. The classification core never sees retry mechanics.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use std::time::Duration;

use anyhow::{Result, anyhow};
use tracing::warn;

pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?.error_for_status()?;
    Ok(resp.bytes().await?.to_vec())
}

/// Fetches `url`, retrying up to `attempts` times with a fixed pause between
/// tries. Returns the last error once the budget is exhausted.
pub async fn fetch_with_retry<C: HttpClient>(
    client: &C,
    url: &str,
    attempts: u32,
    retry_delay: Duration,
) -> Result<Vec<u8>> {
    let attempts = attempts.max(1);
    let mut last_err = None;

    for attempt in 1..=attempts {
        match fetch_bytes(client, url).await {
            Ok(bytes) => return Ok(bytes),
            Err(e) => {
                warn!(url, attempt, attempts, error = %e, "Fetch attempt failed");
                last_err = Some(e);
                if attempt < attempts {
                    tokio::time::sleep(retry_delay).await;
                }
            }
        }
    }

    Err(last_err.unwrap_or_else(|| anyhow!("fetch retry budget was zero")))
}
