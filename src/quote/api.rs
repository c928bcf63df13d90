use crate::{
    core::{
        CacheKey, CacheMode, RetryConfig, TfClient, TfError,
        client::{constants::PATH_QUOTES, retry},
        net::{self, ApiRequest},
    },
    quote::{
        model::{Quote, QuoteSnapshot},
        wire::{QuoteNode, QuotesEnvelope},
    },
};

pub(super) async fn fetch_snapshot(
    client: &TfClient,
    freshness: std::time::Duration,
    cache_mode: CacheMode,
    retry_cfg: &RetryConfig,
) -> Result<QuoteSnapshot, TfError> {
    let req = ApiRequest::get(
        PATH_QUOTES,
        CacheKey::new("finhub/quotes").build(),
        "failed to retrieve market quotes",
    )
    .freshness(freshness)
    .cache_mode(cache_mode);

    let envelope: QuotesEnvelope =
        retry::run(retry_cfg, "quotes", || net::get_json(client, &req)).await?;

    if envelope.count as usize != envelope.quotes.len() {
        tracing::warn!(
            reported = envelope.count,
            received = envelope.quotes.len(),
            "quote count does not match payload"
        );
    }

    Ok(QuoteSnapshot {
        quotes: envelope
            .quotes
            .into_iter()
            .map(|(symbol, node)| {
                let quote = map_quote(symbol.clone(), node);
                (symbol, quote)
            })
            .collect(),
        timestamp: envelope.timestamp,
        count: envelope.count,
    })
}

fn map_quote(symbol: String, n: QuoteNode) -> Quote {
    Quote {
        symbol,
        current_price: n.c,
        change: n.d,
        percent_change: n.dp,
        high: n.h,
        low: n.l,
        open: n.o,
        previous_close: n.pc,
        timestamp: n.t,
    }
}
