// Plugin descriptors understood by the bundler

pub mod copy_plugin;
pub mod descriptor;
pub mod dotenv_plugin;

pub use copy_plugin::{CopyOptions, CopyPattern, RUNTIME_CONFIG_NAME};
pub use descriptor::{HtmlOptions, PluginDescriptor};
pub use dotenv_plugin::DotenvOptions;
