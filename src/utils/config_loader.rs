use crate::core::models::{ensure_within, ProjectLayout};
use crate::utils::{BuildModeError, Logger, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "buildmode.config.json";

/// Configuration file format (buildmode.config.json)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectConfig {
    /// Entry point file (default: "./src/index.js")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,

    /// Output directory (default: "dist")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outdir: Option<String>,

    /// HTML template (default: "src/index.html")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_template: Option<String>,

    /// Env file used for production builds (default: "./.env")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prod_env_file: Option<String>,

    /// Env file used for every other mode (default: "./.env.dev")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_env_file: Option<String>,

    /// Directory holding config.{dev,test,stage,prod}.js (default: "src/config")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_dir: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

/// Values given on the command line; these beat the config file
#[derive(Debug, Clone, Default)]
pub struct LayoutOverrides {
    pub outdir: Option<String>,
    pub port: Option<u16>,
    pub host: Option<String>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load buildmode.config.json from the project root, if present
    pub fn load_from_file(root: &Path) -> Result<Option<ProjectConfig>> {
        let config_path = root.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            Logger::debug(&format!("No {} found, using defaults", CONFIG_FILE_NAME));
            return Ok(None);
        }

        Logger::debug(&format!("Loading config from {}", config_path.display()));

        let content = std::fs::read_to_string(&config_path).map_err(BuildModeError::Io)?;

        let config: ProjectConfig = serde_json::from_str(&content).map_err(|e| {
            BuildModeError::config(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
        })?;

        Ok(Some(config))
    }

    /// Merge file config with CLI arguments (CLI > config file > default).
    ///
    /// The output directory is emptied by `prepare`, so it must resolve to a
    /// directory strictly inside `root`.
    pub fn merge_with_cli(
        file_config: Option<ProjectConfig>,
        root: PathBuf,
        overrides: &LayoutOverrides,
    ) -> Result<ProjectLayout> {
        let base = file_config.unwrap_or_default();
        let defaults = ProjectLayout::with_root(root);

        let path_or = |value: Option<String>, default: PathBuf| {
            value.map(PathBuf::from).unwrap_or(default)
        };

        let layout = ProjectLayout {
            entry: path_or(base.entry, defaults.entry.clone()),
            html_template: path_or(base.html_template, defaults.html_template.clone()),
            prod_env_file: path_or(base.prod_env_file, defaults.prod_env_file.clone()),
            dev_env_file: path_or(base.dev_env_file, defaults.dev_env_file.clone()),
            config_dir: path_or(base.config_dir, defaults.config_dir.clone()),
            outdir: path_or(overrides.outdir.clone().or(base.outdir), defaults.outdir.clone()),
            dev_host: overrides.host.clone().or(base.host).unwrap_or_else(|| defaults.dev_host.clone()),
            dev_port: overrides.port.or(base.port).unwrap_or(defaults.dev_port),
            ..defaults
        };

        ensure_within(&layout.root, &layout.root.join(&layout.outdir))?;

        Ok(layout)
    }

    /// Read the config file under `root` and apply CLI overrides on top
    pub fn load_layout(root: &Path, overrides: &LayoutOverrides) -> Result<ProjectLayout> {
        let file_config = Self::load_from_file(root)?;
        Self::merge_with_cli(file_config, root.to_path_buf(), overrides)
    }
}
