//! Catalog module: fetching the listing page and extracting posters from it.
//!
//! - [`listing`] - retrieval of the listing page body
//! - [`extract`] - the [`PosterExtractor`] turning markup into entries
//! - [`poster`] - the [`PosterEntry`] value and its derivation rules

pub mod extract;
pub mod listing;
pub mod poster;

pub use extract::{PosterExtractor, COVER_ART_SELECTOR};
pub use listing::{fetch_listing, LISTING_URL};
pub use poster::{large_image_url, sanitize_name, PosterEntry, LARGE_MARKER, THUMBNAIL_MARKER};
