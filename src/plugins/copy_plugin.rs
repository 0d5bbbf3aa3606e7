// Copy Plugin: copies files verbatim into the output directory

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name every mode-specific config file is published under
pub const RUNTIME_CONFIG_NAME: &str = "config.js";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyPattern {
    /// Source, relative to the project root
    pub from: PathBuf,
    /// Destination, relative to the output directory
    pub to: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyOptions {
    pub patterns: Vec<CopyPattern>,
}

impl CopyOptions {
    /// Publish `<config_dir>/<file_name>` as `config.js`.
    pub fn runtime_config(config_dir: &Path, file_name: &str) -> Self {
        Self {
            patterns: vec![CopyPattern {
                from: config_dir.join(file_name),
                to: PathBuf::from(RUNTIME_CONFIG_NAME),
            }],
        }
    }
}
