//! Poster extraction from the listing markup.
//!
//! Extraction is a pure function of the page body: no I/O, same input same
//! output. Every `<img>` carrying the cover art marker attribute yields one
//! [`PosterEntry`], in document order, duplicates included.
//!
//! # Examples
//!
//! ```rust
//! use poster_dl::catalog::PosterExtractor;
//!
//! # fn example() -> Result<(), poster_dl::Error> {
//! let html = br#"
//!     <img data-product-box-art-image alt="Ugetsu" src="https://x/ugetsu_thumbnail.jpg">
//!     <img alt="Not cover art" src="https://x/banner.jpg">
//! "#;
//!
//! let entries = PosterExtractor::new()?.extract(html);
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].url, "https://x/ugetsu_large.jpg");
//! # Ok(())
//! # }
//! ```

use super::poster::PosterEntry;
use crate::error::{Error, Result};

use scraper::{Html, Selector};
use tracing::{debug, warn};

/// Selector matching cover art images on the catalog listing.
pub const COVER_ART_SELECTOR: &str = "img[data-product-box-art-image]";

/// Extracts [`PosterEntry`] values from listing pages.
#[derive(Debug, Clone)]
pub struct PosterExtractor {
    selector: Selector,
}

impl PosterExtractor {
    /// Creates an extractor matching [`COVER_ART_SELECTOR`].
    pub fn new() -> Result<Self> {
        Self::with_selector(COVER_ART_SELECTOR)
    }

    /// Creates an extractor for a custom CSS selector.
    pub fn with_selector(selector: &str) -> Result<Self> {
        let selector = Selector::parse(selector)
            .map_err(|e| Error::Selector(format!("{selector}: {e}")))?;
        Ok(Self { selector })
    }

    /// Extracts every poster entry from `body`, in document order.
    ///
    /// A page without matches yields an empty vector. Matching elements that
    /// lack an `alt` or `src` attribute are skipped.
    pub fn extract(&self, body: &[u8]) -> Vec<PosterEntry> {
        let html = String::from_utf8_lossy(body);
        let document = Html::parse_document(&html);

        let mut entries = Vec::new();
        for element in document.select(&self.selector) {
            let attrs = element.value();
            let (Some(alt), Some(src)) = (attrs.attr("alt"), attrs.attr("src")) else {
                warn!(
                    "Ignoring cover art element without alt/src: {}",
                    element.html()
                );
                continue;
            };
            entries.push(PosterEntry::from_element(alt, src));
        }

        debug!("Extracted {} poster entries", entries.len());
        entries
    }
}
