//! HTTP fetching for remote datasets.
//!
//! The [`HttpClient`] trait keeps the transport swappable in tests; the
//! binary only ever uses [`BasicClient`].

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::Result;

/// Downloads the body at `url` as raw bytes.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    Ok(resp.bytes().await?.to_vec())
}
