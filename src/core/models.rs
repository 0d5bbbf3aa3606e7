use crate::core::rules::ModuleRule;
use crate::plugins::{CopyPattern, PluginDescriptor};
use crate::utils::{BuildModeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Deployment mode selected by the caller (usually from `NODE_ENV`).
///
/// `Development` doubles as the fallback for any value that is not one of
/// the other three, including an unset value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    Development,
    Staging,
    Production,
    Test,
}

impl DeploymentMode {
    pub const ALL: [DeploymentMode; 4] = [
        DeploymentMode::Staging,
        DeploymentMode::Production,
        DeploymentMode::Test,
        DeploymentMode::Development,
    ];

    /// Exact, case-sensitive match. Anything unrecognized is `Development`.
    pub fn from_input(raw: Option<&str>) -> Self {
        match raw {
            Some("staging") => DeploymentMode::Staging,
            Some("production") => DeploymentMode::Production,
            Some("test") => DeploymentMode::Test,
            _ => DeploymentMode::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentMode::Development => "development",
            DeploymentMode::Staging => "staging",
            DeploymentMode::Production => "production",
            DeploymentMode::Test => "test",
        }
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of parsing a raw mode value, keeping the input around so callers
/// can tell a deliberate development build from a mistyped mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSelection {
    pub mode: DeploymentMode,
    pub raw: Option<String>,
}

impl ModeSelection {
    pub fn parse(raw: Option<&str>) -> Self {
        Self {
            mode: DeploymentMode::from_input(raw),
            raw: raw.map(str::to_string),
        }
    }

    /// True when a non-empty value was given but not recognized.
    pub fn is_fallback(&self) -> bool {
        match self.raw.as_deref() {
            None | Some("") | Some("development") => false,
            Some(_) => self.mode == DeploymentMode::Development,
        }
    }
}

/// Bundler optimization mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Development => f.write_str("development"),
            BuildMode::Production => f.write_str("production"),
        }
    }
}

/// Output compatibility target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    /// Plain web runtime
    #[serde(rename = "web")]
    Web,
    /// Derived from the project's browser compatibility list
    #[serde(rename = "browserslist")]
    Browserslist,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Web => f.write_str("web"),
            Target::Browserslist => f.write_str("browserslist"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    pub path: PathBuf,
    pub filename: String,
    pub asset_module_filename: String,
    pub public_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerOptions {
    pub hot: bool,
    pub open: bool,
    pub overlay: bool,
    pub write_to_disk: bool,
    pub port: u16,
    pub host: String,
    pub public: String,
    pub disable_host_check: bool,
    pub history_api_fallback: bool,
}

impl DevServerOptions {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            hot: true,
            open: true,
            overlay: true,
            write_to_disk: true,
            port,
            host: host.into(),
            public: format!("localhost:{}", port),
            disable_host_check: true,
            history_api_fallback: true,
        }
    }
}

impl Default for DevServerOptions {
    fn default() -> Self {
        Self::new("0.0.0.0", 3000)
    }
}

/// Paths and server bindings the resolved configuration points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub entry: PathBuf,
    pub html_template: PathBuf,
    pub prod_env_file: PathBuf,
    pub dev_env_file: PathBuf,
    pub config_dir: PathBuf,
    pub outdir: PathBuf,
    pub dev_host: String,
    pub dev_port: u16,
}

impl ProjectLayout {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            entry: PathBuf::from("./src/index.js"),
            html_template: PathBuf::from("src/index.html"),
            prod_env_file: PathBuf::from("./.env"),
            dev_env_file: PathBuf::from("./.env.dev"),
            config_dir: PathBuf::from("src/config"),
            outdir: PathBuf::from("dist"),
            dev_host: "0.0.0.0".to_string(),
            dev_port: 3000,
        }
    }
}

/// Complete configuration handed to the bundler for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfiguration {
    pub deployment: DeploymentMode,
    pub mode: BuildMode,
    pub target: Target,
    pub context: PathBuf,
    pub entry: PathBuf,
    pub output: OutputOptions,
    pub devtool: String,
    pub environment_file_path: PathBuf,
    pub module_rules: Vec<ModuleRule>,
    pub plugins: Vec<PluginDescriptor>,
    pub dev_server: DevServerOptions,
}

impl BuildConfiguration {
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(PluginDescriptor::name).collect()
    }

    pub fn hot_reload_enabled(&self) -> bool {
        self.plugins.iter().any(PluginDescriptor::is_hot_reload)
    }

    /// Every copy pattern across all copy descriptors, in plugin order.
    pub fn copy_patterns(&self) -> impl Iterator<Item = &CopyPattern> {
        self.plugins.iter().flat_map(|plugin| match plugin {
            PluginDescriptor::Copy(options) => options.patterns.as_slice(),
            _ => &[][..],
        })
    }

    /// Every module rule whose conditions match `request`, in table order.
    /// The bundler applies all of them, not just the first.
    pub fn rules_for(&self, request: &str) -> Vec<&ModuleRule> {
        self.module_rules
            .iter()
            .filter(|rule| rule.matches(request))
            .collect()
    }

    /// The output directory, checked to lie strictly inside the project.
    pub fn output_dir(&self) -> Result<PathBuf> {
        ensure_within(&self.context, &self.output.path)
    }

    /// Resolve a configuration-relative path against the project context.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.context.join(path)
        }
    }
}

/// Lexical normalisation: drops `.` and folds `..` into its parent.
/// Symlinks are not followed.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is still `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }

    out
}

/// Normalise `path` and require it to sit strictly below `root`.
pub fn ensure_within(root: &Path, path: &Path) -> Result<PathBuf> {
    let root = normalize_path(root);
    let path = normalize_path(path);

    let escapes = path.components().any(|c| c == Component::ParentDir)
        || path.is_absolute() != root.is_absolute()
        || !path.starts_with(&root)
        || path == root;

    if escapes {
        return Err(BuildModeError::InvalidPath(format!(
            "{} is not inside project root {}",
            path.display(),
            root.display()
        )));
    }

    Ok(path)
}
