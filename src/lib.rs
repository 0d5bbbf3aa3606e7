//! Resolves a deployment mode (`development`, `staging`, `production`,
//! `test`) into the build configuration handed to the bundler.

pub mod cli;
pub mod core;
pub mod infrastructure;
pub mod plugins;
pub mod utils;

pub use crate::core::{BuildConfiguration, ConfigResolver, DeploymentMode, ProjectLayout};
pub use crate::utils::{BuildModeError, Result};
