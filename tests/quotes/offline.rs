use crate::common;
use httpmock::Method::GET;
use timeflow_rs::quote::quotes;

#[tokio::test]
async fn snapshot_maps_short_field_names() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/finhub/quotes");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::quotes_body());
    });

    let client = common::client_for(&server);
    let snapshot = quotes(&client).await.unwrap();
    mock.assert();

    assert_eq!(snapshot.count, 2);
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.symbols().collect::<Vec<_>>(), ["AAPL", "MSFT"]);
    assert_eq!(snapshot.timestamp.to_rfc3339(), "2024-05-01T10:00:00+00:00");

    let aapl = snapshot.get("AAPL").unwrap();
    assert_eq!(aapl.symbol, "AAPL");
    assert_eq!(aapl.current_price, 182.5);
    assert_eq!(aapl.change, 2.3);
    assert_eq!(aapl.percent_change, 1.27);
    assert_eq!(aapl.high, 183.1);
    assert_eq!(aapl.low, 179.8);
    assert_eq!(aapl.open, 180.2);
    assert_eq!(aapl.previous_close, 180.2);
    assert_eq!(aapl.timestamp, 1714560000);
    assert!(aapl.is_up());

    assert!(!snapshot.get("MSFT").unwrap().is_up());
    assert!(snapshot.get("TSLA").is_none());
}

#[tokio::test]
async fn count_mismatch_is_accepted() {
    let server = common::setup_server();
    let _mock = server.mock(|when, then| {
        when.method(GET).path("/finhub/quotes");
        then.status(200)
            .header("content-type", "application/json")
            .body(
                r#"{"quotes":{"V":{"c":1,"d":0,"dp":0,"h":1,"l":1,"o":1,"pc":1,"t":1}},
                    "timestamp":"2024-05-01T10:00:00Z","count":10}"#,
            );
    });

    let client = common::client_for(&server);
    let snapshot = quotes(&client).await.unwrap();

    assert_eq!(snapshot.count, 10);
    assert_eq!(snapshot.len(), 1);
}
