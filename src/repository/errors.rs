use thiserror::Error;

/// Failure of a call to the notice API.
///
/// Every variant is recoverable by the caller: the list service turns any of
/// them into a failed result view.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection, timeout, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Server {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The envelope reported `status: "error"`.
    #[error("request rejected ({code}): {message}")]
    Rejected { code: String, message: String },

    /// The body could not be parsed as JSON of the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The body parsed but lacks a field the caller depends on.
    #[error("malformed response: missing `{0}`")]
    Malformed(&'static str),

    /// The request could not be built from the given input.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::InvalidRequest(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[cfg(feature = "client")]
impl From<serde_html_form::ser::Error> for ApiError {
    fn from(err: serde_html_form::ser::Error) -> Self {
        ApiError::InvalidRequest(format!("query encoding: {err}"))
    }
}
