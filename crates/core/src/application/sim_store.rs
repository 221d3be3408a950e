// Simulated File Store
// Small in-memory virtual filesystem: a mapping from logical path to a
// stream provider, consulted by every open and existence check the tool
// performs. Unrouted paths pass through to the fallback store untouched.

use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::invocation::normalize;
use crate::port::FileStore;

/// What a routed path yields when opened.
#[derive(Debug, Clone)]
pub enum StreamProvider {
    /// Reads yield a fresh stream over this text; writes are discarded.
    Content(String),
    /// Reads yield nothing; writes are discarded.
    Discard,
}

/// FileStore overlay for one invocation. Routes are compared on normalized
/// absolute paths, so the tool cannot dodge the interception by spelling
/// the same location differently.
pub struct SimulatedFileStore {
    routes: HashMap<PathBuf, StreamProvider>,
    fallback: Arc<dyn FileStore>,
}

impl SimulatedFileStore {
    pub fn new(fallback: Arc<dyn FileStore>) -> Self {
        Self {
            routes: HashMap::new(),
            fallback,
        }
    }

    /// Route `path` to in-memory content.
    pub fn with_content(mut self, path: &Path, text: impl Into<String>) -> Self {
        self.routes
            .insert(normalize(path), StreamProvider::Content(text.into()));
        self
    }

    /// Route `path` to a write-discarding, read-empty stream.
    pub fn with_discard(mut self, path: &Path) -> Self {
        self.routes.insert(normalize(path), StreamProvider::Discard);
        self
    }

    fn route(&self, path: &Path) -> Option<&StreamProvider> {
        self.routes.get(&normalize(path))
    }
}

impl FileStore for SimulatedFileStore {
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read>> {
        match self.route(path) {
            Some(StreamProvider::Content(text)) => {
                Ok(Box::new(io::Cursor::new(text.clone().into_bytes())))
            }
            Some(StreamProvider::Discard) => Ok(Box::new(io::empty())),
            None => self.fallback.open_read(path),
        }
    }

    fn open_write(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        match self.route(path) {
            Some(_) => Ok(Box::new(io::sink())),
            None => self.fallback.open_write(path),
        }
    }

    fn is_file(&self, path: &Path) -> bool {
        self.route(path).is_some() || self.fallback.is_file(path)
    }
}
