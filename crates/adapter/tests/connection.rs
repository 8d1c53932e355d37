// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Adapter and connection tests against the mock driver

use std::sync::Arc;
use std::time::Duration;

use harlequin_wherobots_adapter::{
    AdapterError, AdapterOptions, ConfigError, DEFAULT_ENDPOINT, DriverError, WherobotsAdapter,
};
use harlequin_wherobots_catalog::MetadataClient;
use harlequin_wherobots_test_utils::{CatalogFixtures, DriverCall, MockDriver, MockMetadataClient};
use serde_json::json;

fn options() -> AdapterOptions {
    AdapterOptions {
        token: Some("tok".to_string()),
        runtime: Some("tiny".to_string()),
        ..Default::default()
    }
}

fn adapter(options: AdapterOptions, driver: &MockDriver) -> WherobotsAdapter {
    WherobotsAdapter::new(options, Arc::new(driver.clone()))
}

#[tokio::test]
async fn test_connect_through_host() {
    let driver = MockDriver::new();
    let conn = adapter(options(), &driver).connect().await.unwrap();
    assert!(!conn.is_closed());

    let state = driver.state();
    assert_eq!(state.calls.len(), 1);
    match &state.calls[0] {
        DriverCall::Connect(params) => {
            assert_eq!(params.host, DEFAULT_ENDPOINT);
            assert_eq!(params.token.as_deref(), Some("tok"));
            assert_eq!(params.runtime.as_deref(), Some("TINY"));
            assert_eq!(params.region, None);
        }
        other => panic!("expected host connect, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connect_direct_with_ws_url() {
    let driver = MockDriver::new();
    let options = AdapterOptions {
        ws_url: Some("wss://session.example/sql".to_string()),
        api_key: Some("key".to_string()),
        token: None,
        ..options()
    };
    adapter(options, &driver).connect().await.unwrap();

    let state = driver.state();
    match &state.calls[0] {
        DriverCall::ConnectDirect { uri, headers } => {
            assert_eq!(uri, "wss://session.example/sql");
            assert_eq!(headers.get("X-API-Key").map(String::as_str), Some("key"));
            assert!(!headers.contains_key("Authorization"));
        }
        other => panic!("expected direct connect, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_options_never_reach_driver() {
    let driver = MockDriver::new();
    let options = AdapterOptions {
        conn_str: vec!["a.com".to_string(), "b.com".to_string()],
        ..options()
    };
    let result = adapter(options, &driver).connect().await;
    assert!(matches!(
        result,
        Err(AdapterError::Config(ConfigError::TooManyConnectionStrings(2)))
    ));
    assert!(driver.state().calls.is_empty());
}

#[tokio::test]
async fn test_driver_failure_is_connection_error() {
    let driver =
        MockDriver::new().failing_with(DriverError::Authentication("bad token".to_string()));
    let result = adapter(options(), &driver).connect().await;
    match result {
        Err(err @ AdapterError::ConnectionFailed(_)) => {
            assert!(err.to_string().contains("bad token"));
        }
        Err(other) => panic!("expected ConnectionFailed, got {:?}", other),
        Ok(_) => panic!("expected ConnectionFailed"),
    }
}

#[tokio::test]
async fn test_execute_and_fetch() {
    let driver = MockDriver::new().with_rows(CatalogFixtures::rows(vec![
        json!({"id": 1, "geom": "POINT (0 0)"}),
        json!({"id": 2, "geom": "POINT (1 1)"}),
    ]));
    let conn = adapter(options(), &driver).connect().await.unwrap();

    let cursor = conn.execute("SELECT id, geom FROM places").await.unwrap();
    assert!(cursor.columns().is_empty());

    let results = cursor.fetchall().await.unwrap();
    assert_eq!(results.row_count(), 2);
    assert_eq!(
        cursor.columns(),
        vec![
            ("id".to_string(), "integer".to_string()),
            ("geom".to_string(), "string".to_string()),
        ]
    );

    let state = driver.state();
    assert_eq!(state.queries, vec!["SELECT id, geom FROM places"]);
    assert_eq!(state.fetches, 1);
    assert_eq!(state.cursor_closes, 1);
}

#[tokio::test]
async fn test_query_error() {
    let driver = MockDriver::new().with_query_error(DriverError::Database("no such table".to_string()));
    let conn = adapter(options(), &driver).connect().await.unwrap();

    let result = conn.execute("SELECT * FROM missing").await;
    match result {
        Err(err @ AdapterError::QueryFailed(_)) => {
            assert_eq!(err.to_string(), "Query error: Database error: no such table");
        }
        Err(other) => panic!("expected QueryFailed, got {:?}", other),
        Ok(_) => panic!("expected QueryFailed"),
    }
    assert_eq!(conn.open_cursors(), 0);
    assert_eq!(driver.state().cursor_closes, 1);
}

#[tokio::test]
async fn test_cancel_closes_all_cursors() {
    let driver = MockDriver::new();
    let conn = adapter(options(), &driver).connect().await.unwrap();

    let first = conn.execute("SELECT 1").await.unwrap();
    let second = conn.execute("SELECT 2").await.unwrap();
    assert_eq!(conn.open_cursors(), 2);

    conn.cancel().await;
    assert_eq!(conn.open_cursors(), 0);
    assert!(first.is_closed());
    assert!(second.is_closed());
    assert_eq!(driver.state().cursor_closes, 2);

    assert!(matches!(first.fetchall().await, Err(AdapterError::CursorClosed)));
}

#[tokio::test]
async fn test_close_connection() {
    let driver = MockDriver::new();
    let mut conn = adapter(options(), &driver).connect().await.unwrap();
    conn.execute("SELECT 1").await.unwrap();

    conn.close().await.unwrap();
    assert!(conn.is_closed());
    assert!(matches!(
        conn.execute("SELECT 1").await,
        Err(AdapterError::ConnectionClosed)
    ));

    // Closing twice is a no-op.
    conn.close().await.unwrap();

    let state = driver.state();
    assert_eq!(state.connection_closes, 1);
    assert_eq!(state.cursor_closes, 1);
}

#[tokio::test]
async fn test_get_catalog_through_connection() {
    let client = Arc::new(
        MockMetadataClient::new()
            .with_hierarchy(&CatalogFixtures::two_table_hierarchy())
            .with_table_schema("id1", "d1", "t1", &CatalogFixtures::simple_schema()),
    );
    let driver = MockDriver::new();
    let conn = adapter(options(), &driver)
        .with_metadata_client(Arc::clone(&client) as Arc<dyn MetadataClient>)
        .connect()
        .await
        .unwrap();

    let catalog = conn.get_catalog().await.unwrap();
    assert_eq!(catalog.find("c1.d1.t1").unwrap().children.len(), 2);
    assert!(catalog.find("c1.d1.t2").unwrap().children.is_empty());
    assert_eq!(client.request_count(), 3);
}

#[tokio::test]
async fn test_get_catalog_failure_messages() {
    let driver = MockDriver::new();

    let missing: Arc<dyn MetadataClient> = Arc::new(MockMetadataClient::new());
    let conn = adapter(options(), &driver)
        .with_metadata_client(missing)
        .connect()
        .await
        .unwrap();
    let err = conn.get_catalog().await.unwrap_err();
    assert_eq!(err.to_string(), "Error reading catalog information from Wherobots");

    let invalid: Arc<dyn MetadataClient> =
        Arc::new(MockMetadataClient::new().with_hierarchy(&json!({"catalogs": "nope"})));
    let conn = adapter(options(), &driver)
        .with_metadata_client(invalid)
        .connect()
        .await
        .unwrap();
    let err = conn.get_catalog().await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid catalog data!");
}

#[tokio::test]
async fn test_zero_concurrency_rejected_before_connect() {
    let driver = MockDriver::new();
    let options = AdapterOptions {
        max_concurrent_fetches: 0,
        ..options()
    };
    let result = adapter(options, &driver).connect().await;
    assert!(matches!(result, Err(AdapterError::Config(_))));
    assert!(driver.state().calls.is_empty());
}

#[tokio::test]
async fn test_cancel_interrupts_running_query() {
    let driver = MockDriver::new().with_fetch_delay(Duration::from_secs(30));
    let conn = adapter(options(), &driver).connect().await.unwrap();

    let cursor = conn.execute("SELECT * FROM huge").await.unwrap();
    let fetching = cursor.clone();
    let fetch = tokio::spawn(async move { fetching.fetchall().await });
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(driver.state().fetches, 1);

    tokio::time::timeout(Duration::from_millis(500), conn.cancel())
        .await
        .expect("cancel does not wait for the running query");

    let result = tokio::time::timeout(Duration::from_secs(1), fetch)
        .await
        .expect("fetch stops once cancelled")
        .unwrap();
    assert!(matches!(result, Err(AdapterError::CursorClosed)));
    assert!(cursor.is_closed());
    assert_eq!(driver.state().cursor_closes, 1);
}

#[tokio::test]
async fn test_fetched_cursors_are_not_retained() {
    let driver = MockDriver::new()
        .with_rows(CatalogFixtures::rows(vec![json!({"one": 1})]));
    let conn = adapter(options(), &driver).connect().await.unwrap();

    for _ in 0..3 {
        let cursor = conn.execute("SELECT 1 AS one").await.unwrap();
        cursor.fetchall().await.unwrap();
    }
    // Only the latest cursor is still tracked.
    assert_eq!(conn.open_cursors(), 1);

    let pending = conn.execute("SELECT 2").await.unwrap();
    assert_eq!(conn.open_cursors(), 1);
    assert!(!pending.is_closed());
    let still_open = conn.execute("SELECT 3").await.unwrap();
    assert_eq!(conn.open_cursors(), 2);

    conn.cancel().await;
    assert!(pending.is_closed());
    assert!(still_open.is_closed());
}
