use thiserror::Error;

/// Possible error types while talking to the Secbase API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP request itself failed (DNS, connection, timeout). Never
    /// retried by the transport; refresh is only attempted on a 401 status.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body could not be parsed as a GraphQL envelope.
    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
}
