#![allow(dead_code)]

use poster_dl::http::RetryPolicy;
use poster_dl::{Downloader, DownloaderBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LISTING_PATH: &str = "/shop/browse/list";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// Default retry policy with a backoff short enough for tests
pub fn fast_retry_policy() -> RetryPolicy {
    RetryPolicy {
        backoff_factor: Duration::from_millis(1),
        ..RetryPolicy::default()
    }
}

/// Builds listing markup with one cover art element per `(alt, src)` pair
pub fn listing_html(items: &[(&str, &str)]) -> String {
    let mut html = String::from("<html><body><ul class=\"films\">");
    for (alt, src) in items {
        html.push_str(&format!(
            "<li><a href=\"/films/x\"><img data-product-box-art-image=\"\" alt=\"{alt}\" src=\"{src}\"></a></li>"
        ));
    }
    html.push_str("</ul><img alt=\"logo\" src=\"/logo_thumbnail.png\"></body></html>");
    html
}

/// Serves `html` at [`LISTING_PATH`], expecting `times` fetches
pub async fn mount_listing(server: &MockServer, html: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .expect(times)
        .mount(server)
        .await;
}

/// Serves `content` at `path_str`, expecting `times` fetches
pub async fn mount_poster(server: &MockServer, path_str: &str, content: &[u8], times: u64) {
    Mock::given(method("GET"))
        .and(path(path_str))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .expect(times)
        .mount(server)
        .await;
}

/// A downloader pointed at the mock server's listing and a temp directory
pub fn test_downloader(server: &MockServer, dir: &Path) -> Downloader {
    DownloaderBuilder::new()
        .directory(dir.to_path_buf())
        .listing_url(format!("{}{}", server.uri(), LISTING_PATH))
        .retry_policy(fast_retry_policy())
        .timeout(Duration::from_secs(5))
        .build()
        .expect("Failed to build downloader")
}

/// Asserts that a file holds exactly `content`
pub fn assert_file_content(path: &Path, content: &[u8]) {
    let actual = fs::read(path).unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e));
    assert_eq!(actual, content, "File content mismatch at path: {:?}", path);
}

/// Asserts no partial download was left in `dir`
pub fn assert_no_partial_files(dir: &Path) {
    let partials: Vec<_> = fs::read_dir(dir)
        .expect("Failed to read directory")
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
        .collect();
    assert!(partials.is_empty(), "Partial files left behind: {:?}", partials);
}
