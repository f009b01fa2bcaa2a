//! Content loading errors.

use std::path::PathBuf;

use thiserror::Error;
use wildlands_world::WorldError;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid world data: {0}")]
    World(#[from] WorldError),
}
