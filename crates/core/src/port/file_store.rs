// File Store Port
// Every open and existence check the tool performs goes through here.

use std::io::{self, Read, Write};
use std::path::Path;

/// File access interface
///
/// Implementations:
/// - OsFileStore (infra-fs): the real filesystem
/// - SimulatedFileStore (application): in-memory overlay with pass-through
pub trait FileStore: Send + Sync {
    /// Open a file for reading.
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read>>;

    /// Open a file for writing.
    fn open_write(&self, path: &Path) -> io::Result<Box<dyn Write>>;

    /// Whether a regular file exists at `path`.
    fn is_file(&self, path: &Path) -> bool;

    /// Read a whole file into a string via `open_read`.
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let mut text = String::new();
        self.open_read(path)?.read_to_string(&mut text)?;
        Ok(text)
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;

    /// File store with no files at all. The default fallback in tests that
    /// must never touch the disk: any pass-through is a hard error.
    pub struct NullFileStore;

    impl FileStore for NullFileStore {
        fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read>> {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            ))
        }

        fn open_write(&self, path: &Path) -> io::Result<Box<dyn Write>> {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            ))
        }

        fn is_file(&self, _path: &Path) -> bool {
            false
        }
    }
}
