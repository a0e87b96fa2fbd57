//! Listing page retrieval.

use crate::error::{Error, Result};
use crate::http::HttpClient;

use bytes::Bytes;
use reqwest::Url;
use tracing::{debug, info};

/// The catalog page enumerating every film, ordered by spine number.
pub const LISTING_URL: &str = "https://www.criterion.com/shop/browse/list?sort=spine_number";

/// Fetches the raw body of the listing page.
///
/// Any failure, including an error status, is wrapped into
/// [`Error::Listing`]: there is nothing to download without the listing.
pub async fn fetch_listing(client: &HttpClient, url: &str) -> Result<Bytes> {
    let wrap = |source: Error| Error::listing(url, source);

    let parsed = Url::parse(url).map_err(|e| wrap(Error::InvalidUrl(format!("{url}: {e}"))))?;

    info!("Fetching listing {}", parsed);
    let body = client.fetch_ok(&parsed).await.map_err(wrap)?;
    debug!("Listing body is {} bytes", body.len());

    Ok(body)
}
