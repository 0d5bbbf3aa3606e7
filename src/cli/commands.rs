use crate::core::{models::*, resolver::ConfigResolver};
use crate::infrastructure::{PluginExecutor, Preflight, TokioFileSystemService};
use crate::utils::{BuildModeError, ConfigLoader, LayoutOverrides, Logger, Result, SummaryUI};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "buildmode")]
#[command(about = "Resolve deployment-mode build configuration for the bundler")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by every command that resolves a configuration
#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Deployment mode (staging, production, test; anything else is development)
    #[arg(short, long, env = "NODE_ENV")]
    pub mode: Option<String>,
    /// Project root directory
    #[arg(short, long, default_value = ".")]
    pub root: String,
    /// Output directory, relative to the root
    #[arg(short, long)]
    pub outdir: Option<String>,
    /// Dev server port
    #[arg(long)]
    pub port: Option<u16>,
    /// Dev server host
    #[arg(long)]
    pub host: Option<String>,
    /// Reject unrecognized modes instead of falling back to development
    #[arg(long)]
    pub strict: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Summary,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved configuration
    Resolve {
        #[command(flatten)]
        args: ResolveArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Verify every file the configuration references exists
    Check {
        #[command(flatten)]
        args: ResolveArgs,
    },
    /// Clean the output directory, copy the runtime config and load the env file
    Prepare {
        #[command(flatten)]
        args: ResolveArgs,
        /// Report what would happen without touching the output directory
        #[arg(long)]
        dry_run: bool,
    },
    /// Show which module rules handle a file
    Which {
        /// File path or request, e.g. src/logo.gif
        request: String,
        #[command(flatten)]
        args: ResolveArgs,
    },
    /// Show how each deployment mode resolves
    Modes,
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self) -> Result<()> {
        // Initialize logging
        Logger::init();

        let cli = Cli::parse();
        self.dispatch(cli.command).await
    }

    pub async fn dispatch(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Resolve { args, format } => self.handle_resolve_command(&args, format),
            Commands::Check { args } => self.handle_check_command(&args).await,
            Commands::Prepare { args, dry_run } => {
                self.handle_prepare_command(&args, dry_run).await
            }
            Commands::Which { request, args } => self.handle_which_command(&request, &args),
            Commands::Modes => self.handle_modes_command(),
        }
    }

    /// Build the resolver from the config file and flags, then resolve.
    ///
    /// `NODE_ENV` has already been read by clap; the resolver only sees the value.
    pub fn resolve(&self, args: &ResolveArgs) -> Result<BuildConfiguration> {
        let root = PathBuf::from(&args.root)
            .canonicalize()
            .map_err(|e| BuildModeError::InvalidPath(format!("{}: {}", args.root, e)))?;

        let overrides = LayoutOverrides {
            outdir: args.outdir.clone(),
            port: args.port,
            host: args.host.clone(),
        };
        let resolver = ConfigResolver::new(ConfigLoader::load_layout(&root, &overrides)?);
        let mode = args.mode.as_deref();

        if args.strict {
            return resolver.resolve_strict(mode);
        }

        let selection = ModeSelection::parse(mode);
        if selection.is_fallback() {
            Logger::mode_fallback(selection.raw.as_deref().unwrap_or_default());
        }

        Ok(resolver.resolve(mode))
    }

    fn handle_resolve_command(&self, args: &ResolveArgs, format: OutputFormat) -> Result<()> {
        let config = self.resolve(args)?;

        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
            OutputFormat::Summary => print!("{}", SummaryUI::render_configuration(&config)),
        }

        Ok(())
    }

    async fn handle_check_command(&self, args: &ResolveArgs) -> Result<()> {
        let config = self.resolve(args)?;

        let preflight = Preflight::new(Arc::new(TokioFileSystemService));
        let report = preflight.check(&config).await?;

        print!("{}", SummaryUI::render_preflight(&report));
        report.into_result().map(|_| ())
    }

    async fn handle_prepare_command(&self, args: &ResolveArgs, dry_run: bool) -> Result<()> {
        let config = self.resolve(args)?;

        let executor = PluginExecutor::new(Arc::new(TokioFileSystemService)).with_dry_run(dry_run);
        let actions = executor.execute(&config).await?;

        print!("{}", SummaryUI::render_actions(&actions, dry_run));
        Ok(())
    }

    fn handle_which_command(&self, request: &str, args: &ResolveArgs) -> Result<()> {
        let config = self.resolve(args)?;

        print!("{}", SummaryUI::render_rule_matches(request, &config.rules_for(request)));
        Ok(())
    }

    fn handle_modes_command(&self) -> Result<()> {
        let resolver = ConfigResolver::default();
        let rows: Vec<BuildConfiguration> = DeploymentMode::ALL
            .iter()
            .map(|mode| resolver.resolve_mode(*mode))
            .collect();

        print!("{}", SummaryUI::render_mode_table(&rows));
        Ok(())
    }
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}
