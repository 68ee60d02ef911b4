//! Client core for the Secbase security-management console.
//!
//! Three pieces sit underneath the UI: an authenticated GraphQL
//! transport with one-shot token refresh, a persisted credential
//! session, and a CSV codec for bulk import/export.

pub mod client;
pub mod csv;
pub mod error;
pub mod session;

pub use client::{GraphqlClient, GraphqlError, GraphqlResponse, HttpBackend, HttpReply, ReqwestBackend};
pub use error::ClientError;
pub use session::{
    KeyValueStore, KeyringStore, LoggingNavigator, MemoryStore, Navigator, Session, TokenPair,
    LOGIN_ROUTE,
};
