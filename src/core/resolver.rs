use crate::core::models::*;
use crate::core::rules::ModuleRule;
use crate::plugins::{CopyOptions, DotenvOptions, PluginDescriptor};
use crate::utils::{BuildModeError, Logger, Result};

/// Per-mode branch of the resolution table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ModeProfile {
    build_mode: BuildMode,
    target: Target,
    hot_reload: bool,
    config_file: &'static str,
}

fn profile(mode: DeploymentMode) -> ModeProfile {
    match mode {
        DeploymentMode::Staging => ModeProfile {
            build_mode: BuildMode::Production,
            target: Target::Browserslist,
            hot_reload: false,
            config_file: "config.stage.js",
        },
        DeploymentMode::Production => ModeProfile {
            build_mode: BuildMode::Production,
            target: Target::Browserslist,
            hot_reload: false,
            config_file: "config.prod.js",
        },
        DeploymentMode::Test => ModeProfile {
            build_mode: BuildMode::Development,
            target: Target::Web,
            hot_reload: false,
            config_file: "config.test.js",
        },
        DeploymentMode::Development => ModeProfile {
            build_mode: BuildMode::Development,
            target: Target::Web,
            hot_reload: true,
            config_file: "config.dev.js",
        },
    }
}

/// Turns a deployment mode into a complete [`BuildConfiguration`].
///
/// Resolution never fails and never touches the filesystem; every call builds
/// a fresh value. The mode is passed in by the caller rather than read from
/// the process environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    layout: ProjectLayout,
}

impl ConfigResolver {
    pub fn new(layout: ProjectLayout) -> Self {
        Self { layout }
    }

    /// Resolve a raw mode value. Unset or unrecognized values resolve to
    /// development. Logs one line naming the resolved mode.
    pub fn resolve(&self, mode: Option<&str>) -> BuildConfiguration {
        let selection = ModeSelection::parse(mode);
        Logger::mode_resolved(selection.raw.as_deref(), selection.mode.as_str());
        self.resolve_mode(selection.mode)
    }

    /// Like [`resolve`](Self::resolve), but a non-empty unrecognized value is an error.
    pub fn resolve_strict(&self, mode: Option<&str>) -> Result<BuildConfiguration> {
        let selection = ModeSelection::parse(mode);
        if selection.is_fallback() {
            return Err(BuildModeError::UnknownMode(
                selection.raw.unwrap_or_default(),
            ));
        }
        Ok(self.resolve(mode))
    }

    /// Resolution for an already-parsed mode. Pure, no logging.
    pub fn resolve_mode(&self, mode: DeploymentMode) -> BuildConfiguration {
        let layout = &self.layout;
        let profile = profile(mode);

        let environment_file_path = if mode == DeploymentMode::Production {
            layout.prod_env_file.clone()
        } else {
            layout.dev_env_file.clone()
        };

        let mut plugins = vec![PluginDescriptor::Dotenv(DotenvOptions::new(
            environment_file_path.clone(),
        ))];
        plugins.extend(PluginDescriptor::base_set(layout.html_template.clone()));
        if profile.hot_reload {
            plugins.extend(PluginDescriptor::hot_reload_set());
        }
        plugins.push(PluginDescriptor::Copy(CopyOptions::runtime_config(
            &layout.config_dir,
            profile.config_file,
        )));

        BuildConfiguration {
            deployment: mode,
            mode: profile.build_mode,
            target: profile.target,
            context: layout.root.clone(),
            entry: layout.entry.clone(),
            output: OutputOptions {
                path: layout.root.join(&layout.outdir),
                filename: "index.bundle.js".to_string(),
                asset_module_filename: "images/[hash][ext][query]".to_string(),
                public_path: "/".to_string(),
            },
            devtool: "source-map".to_string(),
            environment_file_path,
            module_rules: ModuleRule::defaults(&layout.root),
            plugins,
            dev_server: DevServerOptions::new(layout.dev_host.clone(), layout.dev_port),
        }
    }
}
