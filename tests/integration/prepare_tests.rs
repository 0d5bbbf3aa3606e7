use buildmode::cli::{CliHandler, Cli};
use buildmode::infrastructure::{ExecutedAction, PluginExecutor, Preflight, TokioFileSystemService};
use buildmode::{BuildModeError, ConfigResolver, DeploymentMode, ProjectLayout};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn scaffold() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path();

    for (rel, content) in [
        ("src/index.js", "import './style.css';"),
        ("src/index.html", "<!doctype html><div id=\"root\"></div>"),
        ("src/config/config.dev.js", "window.ENV = 'dev';"),
        ("src/config/config.test.js", "window.ENV = 'test';"),
        ("src/config/config.stage.js", "window.ENV = 'stage';"),
        ("src/config/config.prod.js", "window.ENV = 'prod';"),
        (".env", "API_URL=https://api.example.com\n"),
        (".env.dev", "API_URL=http://localhost:8000\nDEBUG=true\n"),
    ] {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).expect("mkdir");
        std::fs::write(path, content).expect("write fixture");
    }

    dir
}

fn read(root: &Path, rel: &str) -> String {
    std::fs::read_to_string(root.join(rel)).expect("read output")
}

#[tokio::test]
async fn test_every_mode_passes_preflight_on_full_project() {
    let dir = scaffold();
    let resolver = ConfigResolver::new(ProjectLayout::with_root(dir.path()));
    let preflight = Preflight::new(Arc::new(TokioFileSystemService));

    for mode in DeploymentMode::ALL {
        let report = preflight.check(&resolver.resolve_mode(mode)).await.unwrap();
        assert!(report.is_ok(), "{}: missing {:?}", mode, report.missing);
        assert!(report.warnings.is_empty());
    }
}

#[tokio::test]
async fn test_prepare_publishes_mode_specific_config() {
    let dir = scaffold();
    let resolver = ConfigResolver::new(ProjectLayout::with_root(dir.path()));
    let executor = PluginExecutor::new(Arc::new(TokioFileSystemService));

    for (mode, expected) in [
        (DeploymentMode::Staging, "window.ENV = 'stage';"),
        (DeploymentMode::Production, "window.ENV = 'prod';"),
        (DeploymentMode::Test, "window.ENV = 'test';"),
        (DeploymentMode::Development, "window.ENV = 'dev';"),
    ] {
        let actions = executor.execute(&resolver.resolve_mode(mode)).await.unwrap();
        assert_eq!(read(dir.path(), "dist/config.js"), expected);

        let keys = match &actions[0] {
            ExecutedAction::EnvLoaded { keys, .. } => keys.clone(),
            other => panic!("expected env load first, got {:?}", other),
        };
        let expected_keys: &[&str] = if mode == DeploymentMode::Production {
            &["API_URL"]
        } else {
            &["API_URL", "DEBUG"]
        };
        assert_eq!(keys, expected_keys, "{}", mode);
    }
}

#[tokio::test]
async fn test_check_command_fails_on_missing_files() {
    let dir = TempDir::new().expect("tempdir");
    let cli = Cli::try_parse_from([
        "buildmode",
        "check",
        "--mode",
        "production",
        "--root",
        dir.path().to_str().unwrap(),
    ])
    .unwrap();

    let result = CliHandler::new().dispatch(cli.command).await;

    match result {
        Err(BuildModeError::MissingFiles(missing)) => assert_eq!(missing.len(), 4),
        other => panic!("expected MissingFiles, got {:?}", other),
    }
}

#[tokio::test]
async fn test_prepare_command_dry_run() {
    let dir = scaffold();
    let cli = Cli::try_parse_from([
        "buildmode",
        "prepare",
        "--mode",
        "test",
        "--root",
        dir.path().to_str().unwrap(),
        "--outdir",
        "public",
        "--dry-run",
    ])
    .unwrap();

    CliHandler::new().dispatch(cli.command).await.unwrap();

    assert!(!dir.path().join("public").exists());
}

fn prepare_with_outdir(root: &Path, outdir: &str) -> Cli {
    Cli::try_parse_from([
        "buildmode",
        "prepare",
        "--mode",
        "production",
        "--root",
        root.to_str().unwrap(),
        "--outdir",
        outdir,
    ])
    .unwrap()
}

#[tokio::test]
async fn test_prepare_refuses_to_clean_project_root() {
    let dir = scaffold();

    let result = CliHandler::new()
        .dispatch(prepare_with_outdir(dir.path(), ".").command)
        .await;

    assert!(matches!(result, Err(BuildModeError::InvalidPath(_))), "{:?}", result);
    assert_eq!(read(dir.path(), "src/index.js"), "import './style.css';");
    assert!(dir.path().join(".env").exists());
}

#[tokio::test]
async fn test_prepare_refuses_to_clean_parent_directory() {
    let parent = TempDir::new().expect("tempdir");
    let project = parent.path().join("app");
    std::fs::create_dir_all(project.join("src/config")).unwrap();
    std::fs::write(project.join("src/index.js"), "entry").unwrap();
    std::fs::write(project.join("src/config/config.prod.js"), "prod").unwrap();
    std::fs::write(parent.path().join("neighbour.txt"), "keep").unwrap();

    let result = CliHandler::new()
        .dispatch(prepare_with_outdir(&project, "..").command)
        .await;

    assert!(matches!(result, Err(BuildModeError::InvalidPath(_))), "{:?}", result);
    assert!(project.join("src/index.js").exists());
    assert!(parent.path().join("neighbour.txt").exists());
}

#[tokio::test]
async fn test_prepare_refuses_output_over_sources() {
    let dir = scaffold();

    let result = CliHandler::new()
        .dispatch(prepare_with_outdir(dir.path(), "src").command)
        .await;

    assert!(matches!(result, Err(BuildModeError::InvalidPath(_))), "{:?}", result);
    assert!(dir.path().join("src/config/config.prod.js").exists());
}
