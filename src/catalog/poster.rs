//! The [`PosterEntry`] value and the rules deriving it from markup.
//!
//! # Examples
//!
//! ```rust
//! use poster_dl::catalog::PosterEntry;
//!
//! let entry = PosterEntry::from_element(
//!     "Seven Samurai",
//!     "https://cdn.example.com/films/165_thumbnail.jpg",
//! );
//! assert_eq!(entry.name, "Seven_Samurai");
//! assert_eq!(entry.url, "https://cdn.example.com/films/165_large.jpg");
//! assert_eq!(entry.filename(), "Seven_Samurai.jpg");
//! ```

use std::fmt;

/// Substring marking a low-resolution preview on the image host.
pub const THUMBNAIL_MARKER: &str = "_thumbnail";
/// Substring marking the full-resolution asset.
pub const LARGE_MARKER: &str = "_large";
/// Extension of every stored poster.
pub const POSTER_EXTENSION: &str = "jpg";

/// One poster to download: a filesystem-safe name and its image URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PosterEntry {
    /// Single path segment derived from the film title.
    pub name: String,
    /// Full-resolution image location, possibly relative to the listing.
    pub url: String,
}

impl PosterEntry {
    /// Creates an entry from already derived values.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Creates an entry from the raw `alt` and `src` attributes of a cover
    /// art element.
    pub fn from_element(alt: &str, src: &str) -> Self {
        Self {
            name: sanitize_name(alt),
            url: large_image_url(src),
        }
    }

    /// File name the poster is stored under.
    pub fn filename(&self) -> String {
        format!("{}.{}", self.name, POSTER_EXTENSION)
    }
}

impl fmt::Display for PosterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.name, self.url)
    }
}

/// Replaces spaces and slashes with underscores so a title can never create
/// a nested directory or escape the output directory.
pub fn sanitize_name(title: &str) -> String {
    title.replace([' ', '/'], "_")
}

/// Rewrites every thumbnail marker into the large-image marker. URLs without
/// the marker are returned unchanged.
pub fn large_image_url(src: &str) -> String {
    src.replace(THUMBNAIL_MARKER, LARGE_MARKER)
}
