use thiserror::Error;

/// Broad category of a failed request, used to drive retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestErrorKind {
    /// The connection could not be established or was interrupted.
    Transport,
    /// The request exceeded the client timeout.
    Timeout,
    /// The server answered with a non-success HTTP status.
    Status,
    /// The body could not be decoded into the expected shape.
    Decode,
}

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum TfError {
    /// A request to the backend failed.
    ///
    /// Every transport, timeout, status, and decoding failure is normalized into this
    /// variant. `message` is the human-readable text to show to a user.
    #[error("{message}")]
    Request {
        /// What went wrong.
        kind: RequestErrorKind,
        /// The HTTP status, when the server answered.
        status: Option<u16>,
        /// The URL that was requested.
        url: String,
        /// Server-supplied message, transport message, or an operation-specific fallback.
        message: String,
    },

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// The caller supplied parameters that cannot form a valid request.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

impl TfError {
    /// The request failure category, if this is a request error.
    pub fn kind(&self) -> Option<RequestErrorKind> {
        match self {
            TfError::Request { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// The HTTP status the server answered with, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            TfError::Request { status, .. } => *status,
            _ => None,
        }
    }
}

/// Pick the message carried by a normalized request error.
///
/// The server-supplied message wins, then the transport's own message, then `fallback`.
/// Blank candidates are skipped.
pub fn normalize_message(
    server: Option<&str>,
    transport: Option<&str>,
    fallback: &str,
) -> String {
    [server, transport]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|m| !m.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
