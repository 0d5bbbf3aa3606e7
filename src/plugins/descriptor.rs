// Plugin descriptors: a name plus an options record, handed to the bundler in order

use crate::plugins::copy_plugin::CopyOptions;
use crate::plugins::dotenv_plugin::DotenvOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlOptions {
    pub template: PathBuf,
}

/// One unit of bundler behavior.
///
/// Order matters: the bundler runs plugins in sequence, so CSS extraction must
/// come before HTML generation for the generated page to reference the
/// extracted stylesheet.
///
/// # Example
/// ```
/// use buildmode::plugins::PluginDescriptor;
///
/// let json = serde_json::to_value(&PluginDescriptor::Clean).unwrap();
/// assert_eq!(json["name"], "clean");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "options", rename_all = "kebab-case")]
pub enum PluginDescriptor {
    /// Injects variables from an env file
    Dotenv(DotenvOptions),
    /// Extracts stylesheets into their own file
    MiniCssExtract,
    /// Generates the HTML page from a template
    Html(HtmlOptions),
    /// Empties the output directory before emitting
    Clean,
    ReactRefresh,
    HotModuleReplacement,
    /// Copies files verbatim into the output directory
    Copy(CopyOptions),
}

impl PluginDescriptor {
    pub fn name(&self) -> &'static str {
        match self {
            PluginDescriptor::Dotenv(_) => "dotenv",
            PluginDescriptor::MiniCssExtract => "mini-css-extract",
            PluginDescriptor::Html(_) => "html",
            PluginDescriptor::Clean => "clean",
            PluginDescriptor::ReactRefresh => "react-refresh",
            PluginDescriptor::HotModuleReplacement => "hot-module-replacement",
            PluginDescriptor::Copy(_) => "copy",
        }
    }

    pub fn is_hot_reload(&self) -> bool {
        matches!(
            self,
            PluginDescriptor::ReactRefresh | PluginDescriptor::HotModuleReplacement
        )
    }

    /// Plugins present in every mode: CSS extraction, HTML generation, cleaning.
    pub fn base_set(html_template: impl Into<PathBuf>) -> Vec<PluginDescriptor> {
        vec![
            PluginDescriptor::MiniCssExtract,
            PluginDescriptor::Html(HtmlOptions {
                template: html_template.into(),
            }),
            PluginDescriptor::Clean,
        ]
    }

    pub fn hot_reload_set() -> Vec<PluginDescriptor> {
        vec![
            PluginDescriptor::ReactRefresh,
            PluginDescriptor::HotModuleReplacement,
        ]
    }
}
