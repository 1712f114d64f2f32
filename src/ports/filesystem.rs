//! Filesystem port for reading deployment artifacts.

use std::path::Path;

/// Read-side filesystem access for artifact loading.
///
/// Resolution only ever reads artifact directories; abstracting the reads
/// allows artifact fixtures to come from cassettes or in-memory fakes.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Returns whether the given path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Lists entry names (not full paths) in a directory, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;
}
