// Real-filesystem FileStore implementation

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use claimrun_core::port::FileStore;

/// File store backed by the real filesystem.
///
/// The adapter only reaches this through the simulated overlay, so it sees
/// every open the tool performs except the ones aimed at the simulated
/// claims and marked paths.
pub struct OsFileStore;

impl FileStore for OsFileStore {
    fn open_read(&self, path: &Path) -> io::Result<Box<dyn Read>> {
        Ok(Box::new(File::open(path)?))
    }

    fn open_write(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        Ok(Box::new(File::create(path)?))
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
