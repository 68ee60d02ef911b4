use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Platform "file save" capability: deliver `content` as a file named
/// `filename`. Implementations must not panic for any string input and
/// must release any temporary resource before returning; failures are
/// reported through the log, never to the caller.
pub trait FileSaver: Send + Sync {
    fn save(&self, content: &str, filename: &str, mime: &str);
}

/// Saver that writes downloads into a directory on disk.
pub struct DiskSaver {
    dir: PathBuf,
}

impl DiskSaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSaver for DiskSaver {
    fn save(&self, content: &str, filename: &str, mime: &str) {
        let path = self.dir.join(filename);
        match fs::write(&path, content) {
            Ok(()) => debug!(path = %path.display(), mime, "saved export"),
            Err(err) => warn!(path = %path.display(), %err, "unable to save export"),
        }
    }
}
