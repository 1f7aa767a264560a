use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("{0}")]
    Walk(#[from] walkdir::Error),
    #[error("metadata read failed for {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
