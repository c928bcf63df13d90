//! Symbols the backend tracks and the news publishers it aggregates.

/// Tracked symbols with their company names, in display order.
pub const TRACKED_SYMBOLS: [(&str, &str); 10] = [
    ("AAPL", "Apple Inc."),
    ("GOOGL", "Alphabet Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("AMZN", "Amazon.com Inc."),
    ("TSLA", "Tesla Inc."),
    ("META", "Meta Platforms Inc."),
    ("NVDA", "NVIDIA Corporation"),
    ("NFLX", "Netflix Inc."),
    ("JPM", "JPMorgan Chase & Co."),
    ("V", "Visa Inc."),
];

/// Publishers the news endpoints draw from.
pub const NEWS_SOURCES: [&str; 2] = ["Les Échos", "Boursorama"];

/// Company name for a tracked symbol, or the symbol itself when unknown.
pub fn display_name(symbol: &str) -> &str {
    TRACKED_SYMBOLS
        .iter()
        .find(|(s, _)| s.eq_ignore_ascii_case(symbol))
        .map_or(symbol, |(_, name)| *name)
}

pub fn is_tracked(symbol: &str) -> bool {
    TRACKED_SYMBOLS
        .iter()
        .any(|(s, _)| s.eq_ignore_ascii_case(symbol))
}
