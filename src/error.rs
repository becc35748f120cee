//! Errors of the fallible loading paths (config files, tile maps, scenes).
//!
//! Nothing inside a frame returns these: in-frame problems are logged and
//! skipped.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid tile map JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown scene '{0}'")]
    UnknownScene(String),
}

impl EngineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            path: path.into(),
            source,
        }
    }
}
