use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildModeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown deployment mode '{0}' (expected staging, production, test or development)")]
    UnknownMode(String),

    #[error("{} referenced file(s) missing", .0.len())]
    MissingFiles(Vec<PathBuf>),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl BuildModeError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Format error with the offending paths listed one per line
    pub fn format_detailed(&self) -> String {
        match self {
            BuildModeError::MissingFiles(paths) => {
                let mut output = format!("❌ {}", self);
                for path in paths {
                    output.push_str(&format!("\n   • {}", path.display()));
                }
                output
            }
            _ => format!("❌ {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildModeError>;
