//! Tests for the download worker and the worker pool.

use poster_dl::download::process_one;
use poster_dl::http::{HttpClient, HttpClientConfig};
use poster_dl::{DownloaderBuilder, PosterEntry, Status};

use reqwest::Url;
use std::fs;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::helpers::*;

fn test_client() -> HttpClient {
    HttpClient::new(HttpClientConfig {
        retry: fast_retry_policy(),
        ..HttpClientConfig::default()
    })
    .expect("Failed to create client")
}

#[tokio::test]
async fn test_existing_file_is_skipped_without_request() {
    let server = MockServer::start().await;
    mount_poster(&server, "/ran_large.jpg", b"new bytes", 0).await;
    let temp_dir = create_temp_dir();
    let existing = create_temp_file(temp_dir.path(), "Ran.jpg", b"old bytes");

    let entry = PosterEntry::new("Ran", format!("{}/ran_large.jpg", server.uri()));
    let summary = process_one(&test_client(), None, &entry, temp_dir.path()).await;

    assert_eq!(summary.status(), &Status::Skipped("file already exists".into()));
    assert_file_content(&existing, b"old bytes");
}

#[tokio::test]
async fn test_missing_file_is_written_with_body() {
    let server = MockServer::start().await;
    let content = create_test_content(64 * 1024);
    mount_poster(&server, "/ran_large.jpg", &content, 1).await;
    let temp_dir = create_temp_dir();

    let entry = PosterEntry::new("Ran", format!("{}/ran_large.jpg", server.uri()));
    let summary = process_one(&test_client(), None, &entry, temp_dir.path()).await;

    assert_eq!(summary.status(), &Status::Success);
    assert_eq!(summary.size(), content.len() as u64);
    assert_eq!(summary.path(), temp_dir.path().join("Ran.jpg"));
    assert_file_content(&temp_dir.path().join("Ran.jpg"), &content);
    assert_no_partial_files(temp_dir.path());
}

#[tokio::test]
async fn test_relative_url_is_resolved_against_base() {
    let server = MockServer::start().await;
    mount_poster(&server, "/films/ran_large.jpg", b"ran", 1).await;
    let temp_dir = create_temp_dir();
    let base = Url::parse(&format!("{}{}", server.uri(), LISTING_PATH)).unwrap();

    let entry = PosterEntry::new("Ran", "/films/ran_large.jpg");
    let summary = process_one(&test_client(), Some(&base), &entry, temp_dir.path()).await;

    assert_eq!(summary.status(), &Status::Success);
    assert_file_content(&temp_dir.path().join("Ran.jpg"), b"ran");
}

#[tokio::test]
async fn test_http_error_is_isolated_and_leaves_no_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone_large.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    let temp_dir = create_temp_dir();

    let entry = PosterEntry::new("Gone", format!("{}/gone_large.jpg", server.uri()));
    let summary = process_one(&test_client(), None, &entry, temp_dir.path()).await;

    match summary.status() {
        Status::Fail(msg) => assert!(msg.contains("404"), "unexpected message: {msg}"),
        other => panic!("Expected Fail status, got {:?}", other),
    }
    assert!(!temp_dir.path().join("Gone.jpg").exists());
    assert_no_partial_files(temp_dir.path());
}

#[tokio::test]
async fn test_failed_rename_leaves_no_partial_file() {
    let server = MockServer::start().await;
    mount_poster(&server, "/blocked_large.jpg", b"blocked", 1).await;
    let temp_dir = create_temp_dir();
    let blocker = temp_dir.path().join("Blocked.jpg");
    fs::create_dir(&blocker).unwrap();
    create_temp_file(&blocker, "inner", b"keep");

    let entry = PosterEntry::new("Blocked", format!("{}/blocked_large.jpg", server.uri()));
    let summary = process_one(&test_client(), None, &entry, temp_dir.path()).await;

    assert!(matches!(summary.status(), Status::Fail(_)));
    assert!(blocker.is_dir());
    assert_file_content(&blocker.join("inner"), b"keep");
    assert_no_partial_files(temp_dir.path());
}

#[tokio::test]
async fn test_invalid_url_is_isolated() {
    let temp_dir = create_temp_dir();

    let entry = PosterEntry::new("Nowhere", "not a url");
    let summary = process_one(&test_client(), None, &entry, temp_dir.path()).await;

    assert!(matches!(summary.status(), Status::Fail(_)));
}

#[tokio::test]
async fn test_missing_output_directory_is_isolated() {
    let server = MockServer::start().await;
    mount_poster(&server, "/ran_large.jpg", b"ran", 1).await;
    let temp_dir = create_temp_dir();
    let missing = temp_dir.path().join("does-not-exist");

    let entry = PosterEntry::new("Ran", format!("{}/ran_large.jpg", server.uri()));
    let summary = process_one(&test_client(), None, &entry, &missing).await;

    assert!(matches!(summary.status(), Status::Fail(_)));
    assert!(!missing.exists());
}

#[tokio::test]
async fn test_pool_processes_all_entries_despite_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken_large.jpg"))
        .respond_with(ResponseTemplate::new(503))
        .expect(4)
        .mount(&server)
        .await;
    let temp_dir = create_temp_dir();

    let mut entries = Vec::new();
    for i in 0..12 {
        let p = format!("/poster{i}_large.jpg");
        mount_poster(&server, &p, format!("poster {i}").as_bytes(), 1).await;
        entries.push(PosterEntry::new(format!("Poster_{i}"), format!("{}{}", server.uri(), p)));
    }
    entries.insert(5, PosterEntry::new("Broken", format!("{}/broken_large.jpg", server.uri())));

    let downloader = DownloaderBuilder::new()
        .directory(temp_dir.path().to_path_buf())
        .retry_policy(fast_retry_policy())
        .build()
        .unwrap();
    let summaries = downloader.download(&entries).await;

    assert_eq!(summaries.len(), 13);
    let failed: Vec<_> = summaries
        .iter()
        .filter(|s| matches!(s.status(), Status::Fail(_)))
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].entry().name, "Broken");
    for i in 0..12 {
        assert_file_content(
            &temp_dir.path().join(format!("Poster_{i}.jpg")),
            format!("poster {i}").as_bytes(),
        );
    }
    assert!(!temp_dir.path().join("Broken.jpg").exists());
}

#[tokio::test]
async fn test_pool_resolves_name_collisions() {
    let server = MockServer::start().await;
    mount_poster(&server, "/first_large.jpg", b"first", 1).await;
    mount_poster(&server, "/second_large.jpg", b"second", 0).await;
    let temp_dir = create_temp_dir();

    let first = PosterEntry::new("Same_Name", format!("{}/first_large.jpg", server.uri()));
    let second = PosterEntry::new("Same_Name", format!("{}/second_large.jpg", server.uri()));
    let entries = vec![first.clone(), first, second];

    let downloader = DownloaderBuilder::new()
        .directory(temp_dir.path().to_path_buf())
        .retry_policy(fast_retry_policy())
        .build()
        .unwrap();
    let summaries = downloader.download(&entries).await;

    assert_eq!(summaries.len(), 3);
    let statuses: Vec<_> = summaries.iter().map(|s| s.status().clone()).collect();
    assert!(statuses.contains(&Status::Success));
    assert!(statuses.contains(&Status::Skipped("duplicate entry".into())));
    assert!(statuses.iter().any(|s| matches!(s, Status::Fail(_))));
    assert_eq!(fs::read(temp_dir.path().join("Same_Name.jpg")).unwrap(), b"first");
}

#[tokio::test]
async fn test_pool_with_no_entries() {
    let temp_dir = create_temp_dir();
    let downloader = DownloaderBuilder::new()
        .directory(temp_dir.path().to_path_buf())
        .build()
        .unwrap();

    assert!(downloader.download(&[]).await.is_empty());
}
