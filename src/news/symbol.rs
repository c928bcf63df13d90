//! Source labels may end with the ticker the article is about, as in `"Bloomberg (AAPL)"`.

use crate::news::model::NewsArticle;

/// The trailing ` (SYMBOL)` token of a source label, if any.
///
/// The token must be one or more ASCII upper-case letters, wrapped in parentheses, preceded
/// by a space, and at the very end of the label.
///
/// ```
/// use timeflow_rs::news::extract_symbol;
///
/// assert_eq!(extract_symbol("Bloomberg (AAPL)"), Some("AAPL"));
/// assert_eq!(extract_symbol("Reuters"), None);
/// ```
pub fn extract_symbol(source: &str) -> Option<&str> {
    let inner = source.strip_suffix(')')?;
    let open = inner.rfind(" (")?;
    let token = &inner[open + 2..];
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_uppercase()) {
        Some(token)
    } else {
        None
    }
}

/// The label without its symbol suffix: everything before the first `" ("`.
///
/// ```
/// use timeflow_rs::news::extract_source_name;
///
/// assert_eq!(extract_source_name("Bloomberg (AAPL)"), "Bloomberg");
/// assert_eq!(extract_source_name("Reuters"), "Reuters");
/// ```
pub fn extract_source_name(source: &str) -> &str {
    source.split(" (").next().unwrap_or(source)
}

/// Keep the articles whose source carries `symbol`, in their original order.
pub fn filter_by_symbol<'a, I>(articles: I, symbol: &str) -> Vec<&'a NewsArticle>
where
    I: IntoIterator<Item = &'a NewsArticle>,
{
    articles
        .into_iter()
        .filter(|a| extract_symbol(&a.source) == Some(symbol))
        .collect()
}
