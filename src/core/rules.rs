use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// Pre-compiled rule patterns, shared by every resolved configuration
static SCRIPT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.jsx?$").unwrap());
static TYPESCRIPT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.tsx?$").unwrap());
static STYLESHEET_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(s[ac]|c)ss$").unwrap());
static IMAGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(png|jpe?g|gif|svg)$").unwrap());
static FONT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.(eot|gif|otf|ttf|woff)(\?v=[0-9]\.[0-9]\.[0-9])?$").unwrap()
});

const NODE_MODULES: &str = "node_modules";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    Script,
    TypeScript,
    Stylesheet,
    Image,
    Font,
}

impl RuleKind {
    pub fn pattern(&self) -> &'static Regex {
        match self {
            RuleKind::Script => &*SCRIPT_PATTERN,
            RuleKind::TypeScript => &*TYPESCRIPT_PATTERN,
            RuleKind::Stylesheet => &*STYLESHEET_PATTERN,
            RuleKind::Image => &*IMAGE_PATTERN,
            RuleKind::Font => &*FONT_PATTERN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderOptions {
    pub public_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderSpec {
    pub loader: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<LoaderOptions>,
}

impl LoaderSpec {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: None,
        }
    }
}

/// What the bundler does with a file once a rule matches it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RuleHandler {
    /// Loader chain, applied in order
    Loaders {
        #[serde(rename = "use")]
        loaders: Vec<LoaderSpec>,
    },
    /// Built-in asset module (inline or emitted by size)
    Asset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRule {
    pub kind: RuleKind,
    pub test: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    pub handler: RuleHandler,
}

impl ModuleRule {
    fn new(kind: RuleKind, handler: RuleHandler) -> Self {
        Self {
            kind,
            test: kind.pattern().as_str().to_string(),
            include: None,
            exclude: None,
            handler,
        }
    }

    fn loaders(kind: RuleKind, loaders: Vec<LoaderSpec>) -> Self {
        Self::new(kind, RuleHandler::Loaders { loaders })
    }

    /// The fixed, mode-independent rule table.
    pub fn defaults(root: &Path) -> Vec<ModuleRule> {
        let mut script = Self::loaders(RuleKind::Script, vec![LoaderSpec::new("babel-loader")]);
        script.exclude = Some(NODE_MODULES.to_string());

        let mut typescript = Self::loaders(RuleKind::TypeScript, vec![LoaderSpec::new("ts-loader")]);
        typescript.include = Some(root.to_path_buf());

        let stylesheet = Self::loaders(
            RuleKind::Stylesheet,
            vec![
                LoaderSpec {
                    loader: "mini-css-extract-loader".to_string(),
                    options: Some(LoaderOptions {
                        public_path: String::new(),
                    }),
                },
                LoaderSpec::new("css-loader"),
            ],
        );

        vec![
            script,
            typescript,
            stylesheet,
            Self::new(RuleKind::Image, RuleHandler::Asset),
            Self::loaders(RuleKind::Font, vec![LoaderSpec::new("file-loader")]),
        ]
    }

    /// Whether this rule applies to `request`.
    ///
    /// Relative requests are taken to live under the project root, so they
    /// always satisfy an `include` condition.
    pub fn matches(&self, request: &str) -> bool {
        if !self.kind.pattern().is_match(request) {
            return false;
        }

        if let Some(exclude) = &self.exclude {
            if request.contains(exclude.as_str()) {
                return false;
            }
        }

        if let Some(include) = &self.include {
            let path = Path::new(request);
            if path.is_absolute() && !path.starts_with(include) {
                return false;
            }
        }

        true
    }

    pub fn loader_names(&self) -> Vec<&str> {
        match &self.handler {
            RuleHandler::Loaders { loaders } => loaders.iter().map(|l| l.loader.as_str()).collect(),
            RuleHandler::Asset => Vec::new(),
        }
    }
}
