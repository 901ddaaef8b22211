//! File-backed storage integration tests

use tempfile::TempDir;

use slt_usage_checker::{
    storage::{FileStore, StateStorage},
    types::{CacheEntry, Credentials},
};

mod common;

fn store_in(dir: &TempDir) -> FileStore {
    FileStore::new(dir.path().join("state.json"))
}

#[tokio::test]
async fn test_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let mut document = store.load().await.unwrap();
    document.set_credentials(&Credentials::new("token", "client", "94712345678"));
    document.set_cache_entry(CacheEntry::new(common::summary_cached(), 42));
    document.app_version = Some("1.4.0".to_string());
    store.save(&document).await.unwrap();

    // A fresh store instance over the same path sees the same document
    let reopened = store_in(&dir);
    let loaded = reopened.load().await.unwrap();
    assert_eq!(loaded.credentials().unwrap().subscriber_id, "94712345678");
    assert_eq!(loaded.cache_entry().unwrap().cache_timestamp, 42);
    assert_eq!(loaded.app_version.as_deref(), Some("1.4.0"));
}

#[tokio::test]
async fn test_missing_file_loads_empty_document() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let document = store.load().await.unwrap();
    assert!(document.credentials().is_none());
    assert!(document.cache_entry().is_none());
}

#[tokio::test]
async fn test_malformed_file_loads_empty_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "not json {{{").unwrap();

    let store = FileStore::new(path);
    let document = store.load().await.unwrap();
    assert!(document.credentials().is_none());
}

#[tokio::test]
async fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("nested/deeper/state.json"));

    let document = store.load().await.unwrap();
    store.save(&document).await.unwrap();

    assert!(dir.path().join("nested/deeper/state.json").exists());
}

#[tokio::test]
async fn test_reset_key_set_persists() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let mut document = store.load().await.unwrap();
    document.set_credentials(&Credentials::new("token", "client", "94712345678"));
    document.set_cache_entry(CacheEntry::new(common::summary_cached(), 42));
    document.app_version = Some("1.4.0".to_string());
    document.analytics_client_id = Some("client-uuid".to_string());
    store.save(&document).await.unwrap();

    document.clear_session_data();
    store.save(&document).await.unwrap();

    let loaded = store_in(&dir).load().await.unwrap();
    assert!(loaded.auth_token.is_none());
    assert!(loaded.client_id.is_none());
    assert!(loaded.subscriber_id.is_none());
    assert!(loaded.cached_data.is_none());
    assert!(loaded.cache_timestamp.is_none());
    // The version marker and analytics identity survive a reset
    assert_eq!(loaded.app_version.as_deref(), Some("1.4.0"));
    assert_eq!(loaded.analytics_client_id.as_deref(), Some("client-uuid"));
}
