use buildmode::core::models::{BuildMode, Target};
use buildmode::{ConfigResolver, DeploymentMode, ProjectLayout};
use std::collections::BTreeSet;
use std::path::PathBuf;

const INPUTS: [Option<&str>; 6] = [
    Some("staging"),
    Some("production"),
    Some("test"),
    None,
    Some("development"),
    Some("qa"),
];

fn plugin_set(config: &buildmode::BuildConfiguration) -> BTreeSet<&'static str> {
    config.plugin_names().into_iter().collect()
}

#[test]
fn test_resolution_is_deterministic() {
    let resolver = ConfigResolver::default();

    for input in INPUTS {
        let first = resolver.resolve(input);
        let second = resolver.resolve(input);

        assert_eq!(first.mode, second.mode, "{:?}", input);
        assert_eq!(first.target, second.target, "{:?}", input);
        assert_eq!(plugin_set(&first), plugin_set(&second), "{:?}", input);
        assert_eq!(first, second, "{:?}", input);
    }
}

#[test]
fn test_staging_and_production_differ_only_in_copy_source_and_env() {
    let resolver = ConfigResolver::default();
    let staging = resolver.resolve(Some("staging"));
    let production = resolver.resolve(Some("production"));

    for config in [&staging, &production] {
        assert_eq!(config.mode, BuildMode::Production);
        assert_eq!(config.target, Target::Browserslist);
    }
    assert_eq!(plugin_set(&staging), plugin_set(&production));

    let staging_copy: Vec<PathBuf> = staging.copy_patterns().map(|p| p.from.clone()).collect();
    let production_copy: Vec<PathBuf> = production.copy_patterns().map(|p| p.from.clone()).collect();
    assert_eq!(staging_copy, vec![PathBuf::from("src/config/config.stage.js")]);
    assert_eq!(production_copy, vec![PathBuf::from("src/config/config.prod.js")]);

    assert_eq!(staging.module_rules, production.module_rules);
    assert_eq!(staging.dev_server, production.dev_server);
    assert_eq!(staging.output, production.output);
}

#[test]
fn test_hot_reload_only_in_default_branch() {
    let resolver = ConfigResolver::default();

    for input in INPUTS {
        let config = resolver.resolve(input);
        let expected = config.deployment == DeploymentMode::Development;
        assert_eq!(config.hot_reload_enabled(), expected, "{:?}", input);
        let names = config.plugin_names();
        assert_eq!(names.contains(&"react-refresh"), expected, "{:?}", input);
        assert_eq!(names.contains(&"hot-module-replacement"), expected, "{:?}", input);
    }

    let test = resolver.resolve(Some("test"));
    assert_eq!(test.mode, BuildMode::Development);
    assert_eq!(test.target, Target::Web);

    let unknown = resolver.resolve(Some("qa"));
    assert_eq!(unknown.mode, BuildMode::Development);
    assert_eq!(unknown.target, Target::Web);
}

#[test]
fn test_base_plugins_always_present_and_ordered() {
    let resolver = ConfigResolver::default();

    for input in INPUTS {
        let names = resolver.resolve(input).plugin_names();
        let position = |name: &str| names.iter().position(|n| *n == name);

        let css = position("mini-css-extract").expect("css extraction present");
        let html = position("html").expect("html generation present");
        let clean = position("clean").expect("clean present");
        assert!(css < html, "{:?}", input);
        assert!(html < clean, "{:?}", input);
        assert_eq!(names.iter().filter(|n| **n == "copy").count(), 1);
    }
}

#[test]
fn test_env_file_is_production_only_for_exact_input() {
    let resolver = ConfigResolver::default();

    for input in [
        Some("production"),
        Some("Production"),
        Some("production "),
        Some("staging"),
        Some("test"),
        None,
        Some(""),
    ] {
        let config = resolver.resolve(input);
        let expected = if input == Some("production") { "./.env" } else { "./.env.dev" };
        assert_eq!(config.environment_file_path, PathBuf::from(expected), "{:?}", input);
    }
}

#[test]
fn test_rule_lookup_through_configuration() {
    let config = ConfigResolver::new(ProjectLayout::with_root("/srv/app")).resolve(Some("test"));

    let kinds = |request: &str| -> Vec<RuleKind> {
        config.rules_for(request).iter().map(|r| r.kind).collect()
    };
    use buildmode::core::rules::RuleKind;

    assert_eq!(kinds("src/App.jsx"), vec![RuleKind::Script]);
    assert_eq!(kinds("/srv/app/src/main.ts"), vec![RuleKind::TypeScript]);
    assert_eq!(kinds("styles/site.SCSS"), vec![RuleKind::Stylesheet]);
    assert_eq!(kinds("fonts/icons.eot?v=1.0.0"), vec![RuleKind::Font]);
    assert!(kinds("node_modules/lib/index.js").is_empty());
    assert!(kinds("README.md").is_empty());
}

#[test]
fn test_gif_matches_image_and_font_rules() {
    use buildmode::core::rules::RuleKind;
    let config = ConfigResolver::default().resolve(None);

    let matched: Vec<RuleKind> = config.rules_for("img/spinner.gif").iter().map(|r| r.kind).collect();
    assert_eq!(matched, vec![RuleKind::Image, RuleKind::Font]);

    // uppercase only satisfies the case-insensitive image pattern
    let matched: Vec<RuleKind> = config.rules_for("img/SPINNER.GIF").iter().map(|r| r.kind).collect();
    assert_eq!(matched, vec![RuleKind::Image]);
}

#[test]
fn test_json_shape() {
    let config = ConfigResolver::new(ProjectLayout::with_root("/srv/app")).resolve(Some("staging"));
    let json = serde_json::to_value(&config).unwrap();

    assert_eq!(json["mode"], "production");
    assert_eq!(json["target"], "browserslist");
    assert_eq!(json["deployment"], "staging");
    assert_eq!(json["devtool"], "source-map");
    assert_eq!(json["output"]["path"], "/srv/app/dist");
    assert_eq!(json["output"]["filename"], "index.bundle.js");
    assert_eq!(json["output"]["assetModuleFilename"], "images/[hash][ext][query]");
    assert_eq!(json["output"]["publicPath"], "/");
    assert_eq!(json["environmentFilePath"], "./.env.dev");
    assert_eq!(json["plugins"][0]["name"], "dotenv");
    assert_eq!(json["plugins"][0]["options"]["path"], "./.env.dev");
    assert_eq!(json["plugins"][4]["options"]["patterns"][0]["to"], "config.js");
    assert_eq!(json["devServer"]["port"], 3000);
    assert_eq!(json["devServer"]["host"], "0.0.0.0");
    assert_eq!(json["devServer"]["disableHostCheck"], true);
    assert_eq!(json["moduleRules"].as_array().unwrap().len(), 5);

    let back: buildmode::BuildConfiguration = serde_json::from_value(json).unwrap();
    assert_eq!(back, config);
}
