use crate::core::models::{BuildConfiguration, DeploymentMode};
use crate::core::rules::{ModuleRule, RuleHandler};
use crate::infrastructure::{ExecutedAction, PreflightReport};
use colored::*;

pub struct SummaryUI;

impl SummaryUI {
    pub fn render_configuration(config: &BuildConfiguration) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "\n  {} {}\n\n",
            "BUILDMODE".bright_cyan().bold(),
            config.deployment.to_string().bright_white()
        ));
        out.push_str(&format!("  {:<12} {}\n", "mode".bright_black(), config.mode));
        out.push_str(&format!("  {:<12} {}\n", "target".bright_black(), config.target));
        out.push_str(&format!("  {:<12} {}\n", "entry".bright_black(), config.entry.display()));
        out.push_str(&format!(
            "  {:<12} {}/{}\n",
            "output".bright_black(),
            config.output.path.display(),
            config.output.filename
        ));
        out.push_str(&format!(
            "  {:<12} {}\n",
            "env file".bright_black(),
            config.environment_file_path.display()
        ));

        out.push_str(&format!("\n  {}\n", "plugins".bright_black()));
        for (index, plugin) in config.plugins.iter().enumerate() {
            let marker = if plugin.is_hot_reload() {
                "🔥".to_string()
            } else {
                " ".to_string()
            };
            out.push_str(&format!("  {:>2}. {} {}\n", index + 1, plugin.name().bright_cyan(), marker));
        }
        for pattern in config.copy_patterns() {
            out.push_str(&format!(
                "      {} -> {}\n",
                pattern.from.display(),
                pattern.to.display()
            ));
        }

        out.push_str(&format!("\n  {}\n", "rules".bright_black()));
        for rule in &config.module_rules {
            out.push_str(&format!("  {:<48} {}\n", rule.test, handler_label(rule)));
        }

        if config.hot_reload_enabled() {
            out.push_str(&format!(
                "\n  {} http://{}:{} (public {})\n",
                "dev server".bright_black(),
                config.dev_server.host,
                config.dev_server.port,
                config.dev_server.public
            ));
        }

        out
    }

    /// One row per deployment mode, as produced by `resolve`.
    pub fn render_mode_table(rows: &[BuildConfiguration]) -> String {
        let mut out = format!(
            "\n  {:<12} {:<12} {:<13} {:<12} {}\n",
            "input".bold(),
            "mode".bold(),
            "target".bold(),
            "env file".bold(),
            "extra plugins".bold()
        );

        for config in rows {
            let input = match config.deployment {
                DeploymentMode::Development => "(other)",
                mode => mode.as_str(),
            };
            let extras: Vec<String> = config
                .plugins
                .iter()
                // dotenv + base set
                .skip(4)
                .map(|plugin| match plugin.name() {
                    "copy" => config
                        .copy_patterns()
                        .map(|p| format!("copy {}", p.from.display()))
                        .collect::<Vec<_>>()
                        .join(", "),
                    name => name.to_string(),
                })
                .collect();

            out.push_str(&format!(
                "  {:<12} {:<12} {:<13} {:<12} {}\n",
                input,
                config.mode.to_string(),
                config.target.to_string(),
                config.environment_file_path.display().to_string(),
                extras.join(", ")
            ));
        }

        out
    }

    pub fn render_preflight(report: &PreflightReport) -> String {
        let mut out = String::new();

        for path in &report.checked {
            let status = if report.missing.contains(path) {
                "✗".bright_red()
            } else {
                "✓".bright_green()
            };
            out.push_str(&format!("  {} {}\n", status, path.display()));
        }

        for warning in &report.warnings {
            out.push_str(&format!("  {} {}\n", "!".yellow(), warning));
        }

        if report.is_ok() {
            out.push_str(&format!("\n  {} all referenced files present\n", "✓".bright_green()));
        } else {
            out.push_str(&format!(
                "\n  {} {} missing\n",
                "✗".bright_red(),
                report.missing.len().to_string().bold()
            ));
        }

        out
    }

    /// Every rule that applies to `request`, in the order the bundler runs them.
    pub fn render_rule_matches(request: &str, rules: &[&ModuleRule]) -> String {
        if rules.is_empty() {
            return format!("  {} no rule handles {}\n", "✗".bright_red(), request);
        }

        let mut out = format!("  {}\n", request.bold());
        for rule in rules {
            out.push_str(&format!(
                "  {} {:<12} {}\n",
                "✓".bright_green(),
                format!("{:?}", rule.kind).to_lowercase(),
                handler_label(rule)
            ));
        }
        out
    }

    pub fn render_actions(actions: &[ExecutedAction], dry_run: bool) -> String {
        let mut out = String::new();
        if dry_run {
            out.push_str(&format!("  {}\n", "dry run, nothing written".yellow()));
        }
        for action in actions {
            out.push_str(&format!("  • {}\n", action));
        }
        out
    }
}

fn handler_label(rule: &ModuleRule) -> String {
    match &rule.handler {
        RuleHandler::Asset => "asset".to_string(),
        RuleHandler::Loaders { .. } => rule.loader_names().join(" + "),
    }
}
