mod http;
mod response;

pub use http::{HttpBackend, HttpReply, ReqwestBackend};
pub use response::{GraphqlError, GraphqlResponse};

use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::session::{Navigator, Session, TokenPair, LOGIN_ROUTE};

/// The mutation exchanged for a fresh access/refresh pair when the
/// access token has expired.
const REFRESH_MUTATION: &str = "mutation RefreshToken($token: String!) {
  refreshToken(token: $token) {
    accessToken
    refreshToken
  }
}";

/// Authenticated GraphQL transport with transparent credential refresh.
///
/// Every request carries the stored bearer token. A 401 triggers exactly
/// one refresh and one retry of the original request; if the refresh
/// cannot produce a new token pair, the session is cleared in full and
/// the navigator is pointed at the login route. There is no retry on
/// network-level failure, and concurrent `execute` calls are not
/// serialized against each other, so two simultaneous 401s may each
/// attempt a refresh on their own.
pub struct GraphqlClient {
    endpoint: String,
    backend: Arc<dyn HttpBackend>,
    session: Session,
    navigator: Arc<dyn Navigator>,
}

impl GraphqlClient {
    pub fn new(
        endpoint: impl Into<String>,
        backend: Arc<dyn HttpBackend>,
        session: Session,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            backend,
            session,
            navigator,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Executes a GraphQL document against the configured endpoint.
    ///
    /// Success and GraphQL-level errors both flow through unchanged; only
    /// an expired access token (HTTP 401) is handled here, once.
    pub async fn execute(
        &self,
        document: &str,
        variables: Value,
    ) -> Result<GraphqlResponse, ClientError> {
        let body = json!({ "query": document, "variables": variables });

        let token = self.session.access_token();
        let reply = self
            .backend
            .post_json(&self.endpoint, token.as_deref(), &body)
            .await?;

        if reply.status != 401 {
            return reply.envelope();
        }

        debug!("access token rejected, attempting refresh");

        // Whatever the failed reply held is what the caller gets back when
        // no recovery is possible, mirroring the unrecoverable branches below.
        let original = reply.envelope_lossy();

        let Some(refresh_token) = self.session.refresh_token() else {
            self.end_session();
            return Ok(original);
        };

        let refresh_body = json!({
            "query": REFRESH_MUTATION,
            "variables": { "token": refresh_token },
        });
        let refresh_reply = self
            .backend
            .post_json(&self.endpoint, None, &refresh_body)
            .await?;

        let Some(tokens) = refresh_reply.refresh_pair() else {
            warn!("token refresh failed, ending session");
            self.end_session();
            return Ok(original);
        };

        self.session.store_tokens(&tokens);

        // One retry with the fresh token. Its reply is final either way;
        // a second 401 is not refreshed again.
        let retried = self
            .backend
            .post_json(&self.endpoint, Some(&tokens.access_token), &body)
            .await?;
        retried.envelope()
    }

    /// Persists a freshly issued token pair and the user profile backing
    /// the session, together.
    pub fn login(&self, tokens: &TokenPair, profile_json: &str) {
        self.session.store_tokens(tokens);
        self.session.store_profile(profile_json);
    }

    /// Discards all credentials and returns to the login route.
    pub fn logout(&self) {
        self.end_session();
    }

    fn end_session(&self) {
        self.session.clear();
        self.navigator.navigate(LOGIN_ROUTE);
    }
}
