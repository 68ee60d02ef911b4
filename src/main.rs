use std::env;
use std::process;
use std::sync::Arc;

use secbase_client::{GraphqlClient, KeyringStore, LoggingNavigator, ReqwestBackend, Session};
use serde_json::json;

const DEFAULT_ENDPOINT: &str = "http://localhost:8080/graphql";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let Some(document) = env::args().nth(1) else {
        eprintln!("usage: secbase-client <graphql-document> [variables-json]");
        process::exit(2);
    };
    let variables = match env::args().nth(2) {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                eprintln!("variables are not valid JSON: {err}");
                process::exit(2);
            }
        },
        None => json!({}),
    };

    let endpoint = env::var("SECBASE_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
    let client = GraphqlClient::new(
        endpoint,
        Arc::new(ReqwestBackend::new()),
        Session::new(Arc::new(KeyringStore::new("secbase"))),
        Arc::new(LoggingNavigator),
    );

    match client.execute(&document, variables).await {
        Ok(envelope) => {
            // Success and GraphQL-level errors both print as the raw envelope.
            match serde_json::to_string_pretty(&envelope) {
                Ok(text) => println!("{text}"),
                Err(err) => {
                    eprintln!("unable to render response: {err}");
                    process::exit(1);
                }
            }
            if envelope.has_errors() {
                process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("request failed: {err}");
            process::exit(1);
        }
    }
}
