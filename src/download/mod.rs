//! Download module: the per-poster worker and its result types.
//!
//! - [`worker`] - skip-or-fetch of a single [`PosterEntry`](crate::catalog::PosterEntry)
//! - [`summary`] - [`Summary`], [`Status`] and the aggregated [`BatchReport`]

pub mod summary;
pub mod worker;

pub use summary::{BatchReport, Status, Summary};
pub use worker::{process_one, resolve_url, target_path};
