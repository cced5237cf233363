use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Artifacts directory not found: {0}")]
    ArtifactsDirNotFound(PathBuf),

    #[error("Failed to walk artifacts directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to read artifact {path}: {source}")]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed artifact {path}: {message}")]
    MalformedArtifact { path: PathBuf, message: String },

    #[error("Failed to load {binding} from {path}: {message}")]
    BindingLoad {
        binding: &'static str,
        path: PathBuf,
        message: String,
    },

    #[error("Failed to persist {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ABI error: {0}")]
    Abi(String),
}

impl Error {
    pub fn config(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Config {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::MalformedArtifact {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn binding_load(
        binding: &'static str,
        path: impl Into<PathBuf>,
        message: impl ToString,
    ) -> Self {
        Self::BindingLoad {
            binding,
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
