use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::http::HttpReply;
use crate::error::ClientError;
use crate::session::TokenPair;

/// The `{data, errors}` envelope returned by the GraphQL server.
///
/// A non-empty `errors` list means application-level failure regardless
/// of what `data` holds; the transport passes the envelope through
/// without interpreting the messages.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GraphqlResponse {
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct GraphqlError {
    pub message: String,
}

impl GraphqlResponse {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl HttpReply {
    /// Parses the body as a GraphQL envelope.
    pub fn envelope(&self) -> Result<GraphqlResponse, ClientError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Best-effort variant for replies that have already failed: a body
    /// that is not a JSON envelope becomes an empty one, since the caller
    /// is being sent back to the login screen anyway.
    pub fn envelope_lossy(&self) -> GraphqlResponse {
        serde_json::from_str(&self.body).unwrap_or_default()
    }

    /// Extracts the token pair from a `refreshToken` mutation reply, or
    /// `None` when the reply failed or carried no usable pair.
    pub fn refresh_pair(&self) -> Option<TokenPair> {
        if !self.is_success() {
            return None;
        }
        let envelope: GraphqlResponse = serde_json::from_str(&self.body).ok()?;
        let payload = envelope.data?.get("refreshToken")?.clone();
        serde_json::from_value(payload).ok()
    }
}
