use crate::core::{interfaces::FileSystemService, models::{normalize_path, BuildConfiguration}};
use crate::infrastructure::Preflight;
use crate::plugins::PluginDescriptor;
use crate::utils::{BuildModeError, EnvVarsManager, Logger, Result, Timer};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// What the executor did (or would do, in a dry run) for one descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutedAction {
    /// Variable names only; values never leave the env file
    EnvLoaded { path: PathBuf, keys: Vec<String> },
    EnvMissing { path: PathBuf },
    Cleaned { dir: PathBuf },
    Copied { from: PathBuf, to: PathBuf },
    /// Handled by the bundler itself
    Deferred { plugin: &'static str },
}

impl fmt::Display for ExecutedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutedAction::EnvLoaded { path, keys } => write!(
                f,
                "dotenv: {} variables from {} ({})",
                keys.len(),
                path.display(),
                keys.join(", ")
            ),
            ExecutedAction::EnvMissing { path } => {
                write!(f, "dotenv: {} not found, nothing injected", path.display())
            }
            ExecutedAction::Cleaned { dir } => write!(f, "clean: {}", dir.display()),
            ExecutedAction::Copied { from, to } => {
                write!(f, "copy: {} -> {}", from.display(), to.display())
            }
            ExecutedAction::Deferred { plugin } => write!(f, "{}: left to the bundler", plugin),
        }
    }
}

/// Performs the filesystem half of the plugin list: loading the env file,
/// cleaning the output directory and copying the runtime config.
///
/// Descriptors run in list order, so the clean always precedes the copy.
/// Nothing is touched until the output directory and every copy source
/// have been validated.
pub struct PluginExecutor {
    fs_service: Arc<dyn FileSystemService>,
    dry_run: bool,
}

impl PluginExecutor {
    pub fn new(fs_service: Arc<dyn FileSystemService>) -> Self {
        Self {
            fs_service,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The directory `clean` may remove: strictly inside the project and
    /// not containing any file the build reads.
    fn checked_output_dir(config: &BuildConfiguration) -> Result<PathBuf> {
        let dir = config.output_dir()?;

        if let Some(input) = Preflight::referenced_files(config)
            .into_iter()
            .map(|path| normalize_path(&path))
            .find(|path| path.starts_with(&dir))
        {
            return Err(BuildModeError::InvalidPath(format!(
                "output directory {} contains build input {}",
                dir.display(),
                input.display()
            )));
        }

        Ok(dir)
    }

    fn check_copy_sources(&self, config: &BuildConfiguration) -> Result<()> {
        let missing: Vec<PathBuf> = config
            .copy_patterns()
            .map(|pattern| config.resolve_path(&pattern.from))
            .filter(|from| !self.fs_service.file_exists(from))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(BuildModeError::MissingFiles(missing))
        }
    }

    pub async fn execute(&self, config: &BuildConfiguration) -> Result<Vec<ExecutedAction>> {
        let _timer = Timer::start("plugin execution");

        let out_dir = Self::checked_output_dir(config)?;
        self.check_copy_sources(config)?;

        let mut actions = Vec::with_capacity(config.plugins.len());

        for plugin in &config.plugins {
            match plugin {
                PluginDescriptor::Dotenv(options) => {
                    let path = config.resolve_path(&options.path);
                    if !self.fs_service.file_exists(&path) {
                        Logger::warn(&format!("Env file {} not found", path.display()));
                        actions.push(ExecutedAction::EnvMissing { path });
                        continue;
                    }

                    let content = self.fs_service.read_file(&path).await?;
                    let keys: Vec<String> = EnvVarsManager::parse(&path, &content)
                        .keys()
                        .into_iter()
                        .map(str::to_string)
                        .collect();
                    Logger::env_loaded(&path.display().to_string(), keys.len());
                    actions.push(ExecutedAction::EnvLoaded { path, keys });
                }
                PluginDescriptor::Clean => {
                    let dir = out_dir.clone();
                    if !self.dry_run {
                        self.fs_service.remove_directory(&dir).await?;
                        self.fs_service.create_directory(&dir).await?;
                        Logger::cleaned(&dir.display().to_string());
                    }
                    actions.push(ExecutedAction::Cleaned { dir });
                }
                PluginDescriptor::Copy(options) => {
                    for pattern in &options.patterns {
                        let from = config.resolve_path(&pattern.from);
                        let to = out_dir.join(&pattern.to);
                        if !self.dry_run {
                            self.fs_service.copy_file(&from, &to).await?;
                            Logger::copied(&from.display().to_string(), &to.display().to_string());
                        }
                        actions.push(ExecutedAction::Copied { from, to });
                    }
                }
                other => actions.push(ExecutedAction::Deferred {
                    plugin: other.name(),
                }),
            }
        }

        Ok(actions)
    }
}
