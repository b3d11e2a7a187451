use std::io;
use std::path::PathBuf;
use thiserror::Error;

use terrawatch_core::CatalogError;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Snapshot(#[from] CatalogError),
    #[error("Invalid track file {path}: {source}")]
    Track {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
