//! The download worker: one poster in, one [`Summary`] out.
//!
//! A worker never returns an error. Whatever goes wrong while handling an
//! entry is logged and folded into [`Status::Fail`], so the rest of the batch
//! keeps going.
//!
//! Posters are first written to `<name>.jpg.part` and renamed into place once
//! the whole body is on disk. A file at the final path therefore always holds
//! a complete download, which is what makes skip-if-exists safe. The partial
//! file is truncated when reopened and removed when writing or renaming fails.

use super::summary::{Status, Summary};
use crate::catalog::PosterEntry;
use crate::error::{Error, Result};
use crate::http::HttpClient;

use futures::StreamExt;
use reqwest::Url;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::{fs, fs::OpenOptions, io::AsyncWriteExt};
use tracing::{debug, error, info};

/// Suffix of the temporary file a poster is streamed into.
pub const PARTIAL_SUFFIX: &str = "part";

enum Outcome {
    Exists,
    Written(u64),
}

/// Resolves an image URL, relative ones against `base`.
///
/// ```rust
/// # use color_eyre::{eyre::Report, Result};
/// use poster_dl::download::resolve_url;
/// use reqwest::Url;
///
/// # fn main() -> Result<(), Report> {
/// let base = Url::parse("https://www.criterion.com/shop/browse/list?sort=spine_number")?;
/// let url = resolve_url(Some(&base), "//cdn.example.com/films/165_large.jpg")?;
/// assert_eq!(url.as_str(), "https://cdn.example.com/films/165_large.jpg");
/// assert!(resolve_url(None, "/films/165_large.jpg").is_err());
/// # Ok(())
/// # }
/// ```
pub fn resolve_url(base: Option<&Url>, raw: &str) -> Result<Url> {
    let parsed = match base {
        Some(base) => base.join(raw),
        None => Url::parse(raw),
    };
    parsed.map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))
}

/// Target path of `entry` inside `output_dir`.
pub fn target_path(output_dir: &Path, entry: &PosterEntry) -> PathBuf {
    output_dir.join(entry.filename())
}

/// Downloads one poster unless its file already exists.
pub async fn process_one(
    client: &HttpClient,
    base: Option<&Url>,
    entry: &PosterEntry,
    output_dir: &Path,
) -> Summary {
    let path = target_path(output_dir, entry);
    let summary = Summary::new(entry.clone(), path.clone());

    match fetch(client, base, entry, &path).await {
        Ok(Outcome::Exists) => {
            info!("{} exists, skip", path.display());
            summary.skip("file already exists")
        }
        Ok(Outcome::Written(size)) => {
            info!("Saved {} ({} bytes)", path.display(), size);
            summary.with_size(size).with_status(Status::Success)
        }
        Err(e) => {
            let reason = e.chain();
            error!("download poster for {} failed: {}", entry, reason);
            summary.fail(reason)
        }
    }
}

async fn fetch(
    client: &HttpClient,
    base: Option<&Url>,
    entry: &PosterEntry,
    path: &Path,
) -> Result<Outcome> {
    match fs::metadata(path).await {
        Ok(meta) if meta.is_file() => return Ok(Outcome::Exists),
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let url = resolve_url(base, &entry.url)?;
    let res = client.get(&url).await?;
    let status = res.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    let partial = partial_path(path);
    let written = match persist(res, &partial, path).await {
        Ok(written) => written,
        Err(e) => {
            if let Err(cleanup) = fs::remove_file(&partial).await {
                debug!("Could not remove {:?}: {}", partial, cleanup);
            }
            return Err(e);
        }
    };

    Ok(Outcome::Written(written))
}

async fn persist(res: reqwest::Response, partial: &Path, path: &Path) -> Result<u64> {
    let written = write_body(res, partial).await?;
    debug!("Moving {:?} to {:?}", partial, path);
    fs::rename(partial, path).await?;
    Ok(written)
}

async fn write_body(res: reqwest::Response, partial: &Path) -> Result<u64> {
    debug!("Creating destination file {:?}", partial);
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(partial)
        .await?;

    let mut written: u64 = 0;
    let mut stream = res.bytes_stream();
    while let Some(item) = stream.next().await {
        let mut chunk = item?;
        written += chunk.len() as u64;
        file.write_all_buf(&mut chunk).await?;
    }

    file.flush().await?;
    file.sync_all().await?;
    Ok(written)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}
