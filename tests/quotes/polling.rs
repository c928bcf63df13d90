use crate::common;
use httpmock::Method::GET;
use std::time::{Duration, Instant};
use timeflow_rs::{Backoff, QuotesBuilder, RetryConfig};
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn poller_surfaces_snapshot_and_refetches_on_its_own() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/finhub/quotes");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::quotes_body());
    });

    let client = common::uncached_client_for(&server);
    let poller = QuotesBuilder::new(&client)
        .poll_interval(Duration::from_millis(200))
        .poll();

    let mut rx = poller.subscribe();
    let state = timeout(WAIT, rx.wait_for(|s| s.has_data()))
        .await
        .expect("first snapshot")
        .unwrap()
        .clone();
    let snapshot = state.data.unwrap();
    assert_eq!(snapshot.get("AAPL").unwrap().current_price, 182.5);
    assert!(state.updated_at.is_some());
    assert!(state.error.is_none());

    timeout(WAIT, async {
        while mock.calls() < 3 {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    })
    .await
    .expect("poller kept fetching");

    poller.stop().await;
}

#[tokio::test]
async fn last_good_snapshot_survives_failures() {
    let server = common::setup_server();
    let mut ok = server.mock(|when, then| {
        when.method(GET).path("/finhub/quotes");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::quotes_body());
    });

    let client = common::uncached_client_for(&server);
    let poller = QuotesBuilder::new(&client)
        .poll_interval(Duration::from_millis(150))
        .retry_policy(RetryConfig::disabled())
        .poll();

    let mut rx = poller.subscribe();
    timeout(WAIT, rx.wait_for(|s| s.has_data()))
        .await
        .expect("first snapshot")
        .unwrap();

    ok.delete();
    let _failing = server.mock(|when, then| {
        when.method(GET).path("/finhub/quotes");
        then.status(500).body(r#"{"message":"upstream down"}"#);
    });

    let state = timeout(WAIT, rx.wait_for(|s| s.error.is_some()))
        .await
        .expect("failure surfaced")
        .unwrap()
        .clone();

    assert_eq!(state.error.as_deref(), Some("upstream down"));
    assert!(state.failure_count >= 1);
    let kept = state.data.expect("previous snapshot kept");
    assert_eq!(kept.get("AAPL").unwrap().current_price, 182.5);

    poller.abort();
}

#[tokio::test]
async fn manual_refresh_bypasses_freshness_window() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/finhub/quotes");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::quotes_body());
    });

    let client = common::client_for(&server);
    let builder = QuotesBuilder::new(&client).poll_interval(Duration::from_secs(3600));
    let poller = builder.clone().poll();

    let mut rx = poller.subscribe();
    timeout(WAIT, rx.wait_for(|s| s.has_data()))
        .await
        .expect("first snapshot")
        .unwrap();
    mock.assert_calls(1);

    // a second consumer inside the freshness window is served from cache
    let _ = builder.clone().fetch().await.unwrap();
    mock.assert_calls(1);

    poller.refresh().await;
    timeout(WAIT, async {
        while mock.calls() < 2 {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("refresh hit the network");

    poller.stop().await;
    mock.assert_calls(2);
}

#[tokio::test]
async fn stop_does_not_wait_for_pending_retries() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/finhub/quotes");
        then.status(500);
    });

    let client = common::uncached_client_for(&server);
    let poller = QuotesBuilder::new(&client)
        .retry_policy(RetryConfig {
            max_retries: 3,
            backoff: Backoff::Fixed(Duration::from_secs(1)),
            ..RetryConfig::default()
        })
        .poll();

    timeout(WAIT, async {
        while mock.calls() < 1 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("first attempt sent");

    let started = Instant::now();
    timeout(Duration::from_millis(500), poller.stop())
        .await
        .expect("stop returns while a retry is sleeping");
    assert!(started.elapsed() < Duration::from_millis(500));

    tokio::time::sleep(Duration::from_millis(1200)).await;
    mock.assert_calls(1);
}
