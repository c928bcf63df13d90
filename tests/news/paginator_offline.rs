use crate::common;
use httpmock::Method::GET;
use std::time::Duration;
use timeflow_rs::NewsPaginator;
use tokio::time::timeout;

#[tokio::test]
async fn feed_pages_through_the_archive() {
    let server = common::setup_server();
    let first = server.mock(|when, then| {
        when.method(GET)
            .path("/news/history")
            .query_param("limit", "20")
            .query_param("offset", "0")
            .query_param_missing("source");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::page_body(common::articles("Reuters", 0, 20), 45, 20, 0));
    });
    let second = server.mock(|when, then| {
        when.method(GET)
            .path("/news/history")
            .query_param("offset", "20");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::page_body(common::articles("Reuters", 20, 20), 45, 20, 20));
    });
    let third = server.mock(|when, then| {
        when.method(GET)
            .path("/news/history")
            .query_param("offset", "40");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::page_body(common::articles("Reuters", 40, 5), 45, 20, 40));
    });

    let client = common::client_for(&server);
    let mut feed = NewsPaginator::new(&client);
    feed.mount().await;
    assert_eq!(feed.articles().len(), 20);

    while feed.state().has_next_page() {
        feed.scroll_near_end().await;
    }
    feed.scroll_near_end().await;

    first.assert_calls(1);
    second.assert_calls(1);
    third.assert_calls(1);
    assert_eq!(feed.articles().len(), 45);
    assert_eq!(feed.state().total(), Some(45));
    assert!(feed.state().is_exhausted());
    assert_eq!(feed.articles()[44].title, "Headline 44");
}

#[tokio::test]
async fn short_archive_is_a_single_page() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/news/history");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::page_body(common::articles("Reuters", 0, 5), 5, 20, 0));
    });

    let client = common::client_for(&server);
    let mut feed = NewsPaginator::new(&client);
    feed.mount().await;
    feed.scroll_near_end().await;

    mock.assert_calls(1);
    assert_eq!(feed.articles().len(), 5);
}

#[tokio::test]
async fn filter_is_sent_as_source_and_reapplied_locally() {
    let server = common::setup_server();
    let all = server.mock(|when, then| {
        when.method(GET)
            .path("/news/history")
            .query_param_missing("source");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::page_body(common::articles("Reuters", 0, 20), 45, 20, 0));
    });
    let mut leaked = common::articles("Bloomberg (AAPL)", 0, 3);
    leaked.push(common::article("Bloomberg (MSFT)", 3));
    let aapl = server.mock(|when, then| {
        when.method(GET)
            .path("/news/history")
            .query_param("source", "AAPL")
            .query_param("offset", "0");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::page_body(leaked, 4, 20, 0));
    });

    let client = common::client_for(&server);
    let mut feed = NewsPaginator::new(&client);
    feed.mount().await;
    assert_eq!(feed.articles().len(), 20);

    feed.set_filter(Some("AAPL".into())).await;
    aapl.assert_calls(1);
    assert_eq!(feed.state().pages().len(), 1);
    assert_eq!(feed.state().all_articles().count(), 4);
    let kept = feed.articles();
    assert_eq!(kept.len(), 3);
    assert!(kept.iter().all(|a| a.source_name() == "Bloomberg"));

    // clearing the filter serves page 0 from cache
    feed.set_filter(None).await;
    all.assert_calls(1);
    assert_eq!(feed.articles().len(), 20);
}

#[tokio::test]
async fn failed_page_keeps_what_was_loaded() {
    let server = common::setup_server();
    let _first = server.mock(|when, then| {
        when.method(GET)
            .path("/news/history")
            .query_param("offset", "0");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::page_body(common::articles("Reuters", 0, 20), 45, 20, 0));
    });
    let failing = server.mock(|when, then| {
        when.method(GET)
            .path("/news/history")
            .query_param("offset", "20");
        then.status(500)
            .header("content-type", "application/json")
            .body(r#"{"message":"archive offline"}"#);
    });

    let client = common::client_for(&server);
    let mut feed = NewsPaginator::new(&client).retry_policy(common::fast_retry(1));
    feed.mount().await;
    feed.scroll_near_end().await;

    failing.assert_calls(2);
    assert_eq!(feed.state().error(), Some("archive offline"));
    assert_eq!(feed.articles().len(), 20);
    assert!(feed.state().has_next_page());
    assert!(!feed.state().is_fetching());
}

#[tokio::test]
async fn refresh_refetches_the_first_page() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/news/history")
            .query_param("offset", "0");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::page_body(common::articles("Reuters", 0, 20), 45, 20, 0));
    });

    let client = common::client_for(&server);
    let mut feed = NewsPaginator::new(&client);
    feed.mount().await;
    feed.mount().await;
    mock.assert_calls(1);

    feed.refresh().await;
    mock.assert_calls(2);
    assert_eq!(feed.state().pages().len(), 1);
}

#[tokio::test]
async fn cancelled_scroll_does_not_wedge_the_feed() {
    let server = common::setup_server();
    let _first = server.mock(|when, then| {
        when.method(GET)
            .path("/news/history")
            .query_param("offset", "0");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::page_body(common::articles("Reuters", 0, 20), 45, 20, 0));
    });
    let second = server.mock(|when, then| {
        when.method(GET)
            .path("/news/history")
            .query_param("offset", "20");
        then.status(200)
            .header("content-type", "application/json")
            .delay(Duration::from_millis(400))
            .body(common::page_body(common::articles("Reuters", 20, 20), 45, 20, 20));
    });

    let client = common::client_for(&server);
    let mut feed = NewsPaginator::new(&client);
    feed.mount().await;

    let cancelled = timeout(Duration::from_millis(50), feed.scroll_near_end()).await;
    assert!(cancelled.is_err());
    assert!(!feed.state().is_fetching_next_page());
    assert_eq!(feed.state().pages().len(), 1);

    feed.scroll_near_end().await;
    assert!(second.calls() >= 1);
    assert_eq!(feed.state().pages().len(), 2);
    assert_eq!(feed.articles().len(), 40);
}
