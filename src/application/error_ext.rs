//! Mapping `io::Error` onto [`ApplicationError`] with the offending path

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

pub trait IoResultExt<T> {
    /// Attach `action` and `path` to an I/O failure.
    ///
    /// `NotFound` becomes [`ApplicationError::DataFileNotFound`] so a file that
    /// disappears between the existence check and the read is reported the
    /// same way as one that was never there.
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::DataFileNotFound(path.to_path_buf()),
            _ => ApplicationError::OperationFailed {
                context: format!("{action}: {}", path.display()),
                source: Box::new(e),
            },
        })
    }
}
