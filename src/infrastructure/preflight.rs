use crate::core::{interfaces::FileSystemService, models::BuildConfiguration};
use crate::plugins::PluginDescriptor;
use crate::utils::{BuildModeError, EnvVarsManager, Logger, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Outcome of checking the files a resolved configuration points at
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PreflightReport {
    pub checked: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

impl PreflightReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn into_result(self) -> Result<Self> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(BuildModeError::MissingFiles(self.missing))
        }
    }
}

/// Verifies referenced files exist before the bundler is started, so a
/// missing config or env file shows up as a list instead of a bundler crash.
pub struct Preflight {
    fs_service: Arc<dyn FileSystemService>,
}

impl Preflight {
    pub fn new(fs_service: Arc<dyn FileSystemService>) -> Self {
        Self { fs_service }
    }

    /// Files consumed by the bundler, in plugin order after the entry point
    pub fn referenced_files(config: &BuildConfiguration) -> Vec<PathBuf> {
        let mut files = vec![config.resolve_path(&config.entry)];

        for plugin in &config.plugins {
            match plugin {
                PluginDescriptor::Dotenv(options) => files.push(config.resolve_path(&options.path)),
                PluginDescriptor::Html(options) => files.push(config.resolve_path(&options.template)),
                PluginDescriptor::Copy(options) => {
                    files.extend(options.patterns.iter().map(|p| config.resolve_path(&p.from)));
                }
                _ => {}
            }
        }

        files
    }

    pub async fn check(&self, config: &BuildConfiguration) -> Result<PreflightReport> {
        let mut report = PreflightReport::default();

        for path in Self::referenced_files(config) {
            if !self.fs_service.file_exists(&path) {
                Logger::debug(&format!("Missing referenced file: {}", path.display()));
                report.missing.push(path.clone());
            }
            report.checked.push(path);
        }

        let env_path = config.resolve_path(&config.environment_file_path);
        if self.fs_service.file_exists(&env_path) {
            let content = self.fs_service.read_file(&env_path).await?;
            let env = EnvVarsManager::parse(&env_path, &content);
            for invalid in env.invalid_lines() {
                report.warnings.push(format!(
                    "{}:{}: not a KEY=VALUE line: {}",
                    env_path.display(),
                    invalid.line,
                    invalid.content
                ));
            }
        }

        Ok(report)
    }
}
