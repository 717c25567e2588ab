use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// An anchor, id, or pattern the extractor relies on is absent.
    #[error("{document}: {detail}")]
    StructuralParseFailure { document: String, detail: String },

    #[error("{prompts} maxim prompts supplied but {outputs} maxims extracted")]
    LengthMismatch { prompts: usize, outputs: usize },

    #[error("JSON error in {}: {source}", path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    pub fn structural(document: &str, detail: impl Into<String>) -> Self {
        PipelineError::StructuralParseFailure {
            document: document.to_string(),
            detail: detail.into(),
        }
    }

    /// Map a read failure, turning a missing file into `InputNotFound`.
    pub fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            PipelineError::InputNotFound { path }
        } else {
            PipelineError::Io { path, source }
        }
    }
}
