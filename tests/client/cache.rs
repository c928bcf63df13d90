use crate::common;
use httpmock::Method::GET;
use std::sync::Arc;
use std::time::Duration;
use timeflow_rs::{CacheKey, CacheMode, QuotesBuilder, RequestCache, TfClient};
use url::Url;

#[test]
fn cache_key_sorts_parameters() {
    let a = CacheKey::new("news/history")
        .param("offset", 20)
        .param("limit", 20)
        .opt_param("source", Some("AAPL"))
        .build();
    let b = CacheKey::new("news/history")
        .param("limit", 20)
        .opt_param("source", Some("AAPL"))
        .param("offset", 20)
        .build();
    assert_eq!(a, b);
    assert_eq!(a.as_str(), "news/history?limit=20&offset=20&source=AAPL");

    let none: Option<&str> = None;
    let plain = CacheKey::new("news/history").opt_param("source", none).build();
    assert_eq!(plain.as_str(), "news/history");
}

#[tokio::test]
async fn cache_entries_expire_with_the_callers_window() {
    let cache = RequestCache::new();
    let key = CacheKey::new("finhub/quotes").build();
    cache.put(key.clone(), "{}".to_string(), Duration::from_secs(60)).await;

    assert_eq!(cache.get(&key, Duration::from_secs(60)).await.as_deref(), Some("{}"));
    assert_eq!(cache.get(&key, Duration::ZERO).await, None);
    // a short lookup window does not evict an entry that is still within its own
    assert_eq!(cache.len().await, 1);

    cache.invalidate(&key).await;
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn expired_entries_are_pruned() {
    let cache = RequestCache::new();
    let short = CacheKey::new("news/history").param("offset", 0).build();
    let other = CacheKey::new("news/history").param("offset", 20).build();
    let long = CacheKey::new("finhub/quotes").build();

    cache.put(short.clone(), "a".to_string(), Duration::from_millis(20)).await;
    cache.put(other.clone(), "b".to_string(), Duration::from_millis(20)).await;
    cache.put(long.clone(), "c".to_string(), Duration::from_secs(60)).await;
    tokio::time::sleep(Duration::from_millis(60)).await;

    // an expired entry found on lookup is dropped
    assert_eq!(cache.get(&short, Duration::from_millis(20)).await, None);
    assert_eq!(cache.len().await, 2);

    // writes sweep whatever else has expired
    cache.put(long.clone(), "d".to_string(), Duration::from_secs(60)).await;
    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.get(&long, Duration::from_secs(60)).await.as_deref(), Some("d"));
}

#[tokio::test]
async fn fresh_snapshot_is_served_from_cache() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/finhub/quotes");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::quotes_body());
    });

    let client = common::client_for(&server);
    let builder = QuotesBuilder::new(&client);

    let first = builder.clone().fetch().await.unwrap();
    mock.assert_calls(1);

    let second = builder.clone().fetch().await.unwrap();
    mock.assert_calls(1);
    assert_eq!(first, second);

    // refresh goes to the network and rewrites the entry
    let _ = builder.clone().cache_mode(CacheMode::Refresh).fetch().await.unwrap();
    mock.assert_calls(2);

    let _ = builder.clone().fetch().await.unwrap();
    mock.assert_calls(2);

    let _ = builder.clone().cache_mode(CacheMode::Bypass).fetch().await.unwrap();
    mock.assert_calls(3);
}

#[tokio::test]
async fn stale_entry_triggers_a_new_request() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/finhub/quotes");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::quotes_body());
    });

    let client = common::client_for(&server);
    let builder = QuotesBuilder::new(&client).freshness(Duration::from_millis(50));

    let _ = builder.clone().fetch().await.unwrap();
    tokio::time::sleep(Duration::from_millis(120)).await;
    let _ = builder.clone().fetch().await.unwrap();

    mock.assert_calls(2);
}

#[tokio::test]
async fn injected_cache_is_shared_between_clients() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/finhub/quotes");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::quotes_body());
    });

    let cache = Arc::new(RequestCache::new());
    let base = Url::parse(&server.base_url()).unwrap();
    let a = TfClient::builder()
        .base_url(base.clone())
        .cache(cache.clone())
        .build()
        .unwrap();
    let b = TfClient::builder().base_url(base).cache(cache.clone()).build().unwrap();

    let _ = QuotesBuilder::new(&a).fetch().await.unwrap();
    let _ = QuotesBuilder::new(&b).fetch().await.unwrap();

    mock.assert_calls(1);
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn failed_responses_are_not_cached() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/finhub/quotes");
        then.status(200).body("not json");
    });

    let client = common::client_for(&server);
    let builder = QuotesBuilder::new(&client).retry_policy(timeflow_rs::RetryConfig::disabled());

    assert!(builder.clone().fetch().await.is_err());
    assert!(builder.clone().fetch().await.is_err());
    mock.assert_calls(2);
    assert!(client.cache().unwrap().is_empty().await);
}
