use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("Invalid input in document '{document}': page {page} ('{page_name}') has no content")]
    InvalidInput {
        document: String,
        page: usize,
        page_name: String,
    },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read page {path}: {source}")]
    PageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
