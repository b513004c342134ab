use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while scanning and loading plugin libraries.
///
/// None of these abort a scan; they are collected so the shell can show
/// what was skipped.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to load plugin library {}: {source}", .path.display())]
    LibraryLoad {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
    #[error("plugin library {} does not export the entry symbol", .path.display())]
    MissingEntry { path: PathBuf },
    #[error("failed to scan plugin directory {}: {source}", .path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
