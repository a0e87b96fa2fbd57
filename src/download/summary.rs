//! Download summary functionality.
//!
//! Every poster handed to a worker comes back as a [`Summary`] whose
//! [`Status`] tells whether it was written, skipped, or failed. The
//! [`BatchReport`] aggregates the summaries of a whole run.
//!
//! # Examples
//!
//! ```rust
//! use poster_dl::catalog::PosterEntry;
//! use poster_dl::download::{BatchReport, Status, Summary};
//!
//! let entry = PosterEntry::new("Ran", "https://x/ran_large.jpg");
//! let summary = Summary::new(entry, "src/Ran.jpg".into()).skip("file already exists");
//!
//! match summary.status() {
//!     Status::Skipped(reason) => println!("skipped: {}", reason),
//!     Status::Fail(msg) => println!("failed: {}", msg),
//!     _ => {}
//! }
//!
//! let report = BatchReport::new(vec![summary]);
//! assert_eq!(report.skipped(), 1);
//! assert!(report.is_success());
//! ```

use crate::catalog::PosterEntry;
use std::fmt;
use std::path::{Path, PathBuf};

/// Download status enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Download failed with error message
    Fail(String),
    /// Placeholder set by [`Summary::new`]. Never a final state: every
    /// summary returned by a worker or a batch is `Success`, `Skipped` or
    /// `Fail`.
    NotStarted,
    /// Download was skipped with reason
    Skipped(String),
    /// Download completed successfully
    Success,
}

/// Represents the outcome of one [`PosterEntry`].
#[derive(Debug, Clone)]
pub struct Summary {
    /// The poster handled.
    entry: PosterEntry,
    /// Target path on disk.
    path: PathBuf,
    /// Bytes written.
    size: u64,
    /// Status.
    status: Status,
}

impl Summary {
    /// Create a new, not yet started [`Summary`].
    pub fn new(entry: PosterEntry, path: PathBuf) -> Self {
        Self {
            entry,
            path,
            size: 0,
            status: Status::NotStarted,
        }
    }

    /// Attach a status to a [`Summary`].
    pub fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    /// Record the number of bytes written.
    pub fn with_size(self, size: u64) -> Self {
        Self { size, ..self }
    }

    /// Get a reference to the summary's entry.
    pub fn entry(&self) -> &PosterEntry {
        &self.entry
    }

    /// Get the target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the summary's size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Mark the summary as failed with a message.
    pub fn fail(self, msg: impl fmt::Display) -> Self {
        Self {
            status: Status::Fail(msg.to_string()),
            ..self
        }
    }

    /// Mark the summary as skipped with a message.
    pub fn skip(self, msg: impl fmt::Display) -> Self {
        Self {
            status: Status::Skipped(msg.to_string()),
            ..self
        }
    }
}

/// Aggregated outcome of a batch.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    summaries: Vec<Summary>,
}

impl BatchReport {
    /// Wrap the summaries of a finished batch.
    pub fn new(summaries: Vec<Summary>) -> Self {
        Self { summaries }
    }

    /// All summaries, in completion order.
    pub fn summaries(&self) -> &[Summary] {
        &self.summaries
    }

    /// Number of entries in the batch.
    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    /// Whether the batch had no entries at all.
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Number of posters written during this run.
    pub fn succeeded(&self) -> usize {
        self.count(|s| matches!(s, Status::Success))
    }

    /// Number of posters skipped.
    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, Status::Skipped(_)))
    }

    /// Number of posters that failed.
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, Status::Fail(_)))
    }

    /// Iterate over the failed summaries.
    pub fn failures(&self) -> impl Iterator<Item = &Summary> {
        self.summaries
            .iter()
            .filter(|s| matches!(s.status(), Status::Fail(_)))
    }

    /// True when no entry failed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&Status) -> bool) -> usize {
        self.summaries.iter().filter(|s| pred(s.status())).count()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} posters: {} downloaded, {} skipped, {} failed",
            self.len(),
            self.succeeded(),
            self.skipped(),
            self.failed()
        )
    }
}
