use tracing::info;

/// The route the client falls back to on unrecoverable auth failure.
pub const LOGIN_ROUTE: &str = "/login";

/// Navigation seam for the transport's failure path.
///
/// In a browser shell this is a location redirect; headless consumers
/// plug in whatever "return to login" means for them.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Navigator for headless use: records the intent in the log and
/// otherwise does nothing.
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, route: &str) {
        info!(route, "session ended, navigation requested");
    }
}
