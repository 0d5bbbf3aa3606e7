use crate::utils::Logger;
use std::collections::HashMap;
use std::path::Path;

/// A line that could not be parsed as `KEY=VALUE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEnvLine {
    pub line: usize,
    pub content: String,
}

/// Variables read from the env file selected for a build
#[derive(Debug, Clone)]
pub struct EnvVarsManager {
    variables: HashMap<String, String>,
    invalid_lines: Vec<InvalidEnvLine>,
}

impl EnvVarsManager {
    /// Parse env file `content`. Blank lines and `#` comments are skipped;
    /// `path` only labels warnings.
    pub fn parse(path: &Path, content: &str) -> Self {
        let mut manager = Self {
            variables: HashMap::new(),
            invalid_lines: Vec::new(),
        };

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match parse_env_line(line) {
                Some((key, value)) => {
                    manager.variables.insert(key, value);
                }
                None => {
                    Logger::warn(&format!(
                        "Invalid env line in {} at line {}: {}",
                        path.display(),
                        line_num + 1,
                        line
                    ));
                    manager.invalid_lines.push(InvalidEnvLine {
                        line: line_num + 1,
                        content: line.to_string(),
                    });
                }
            }
        }

        manager
    }

    /// Variable names in sorted order. Values are secrets and stay out of output.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.variables.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn invalid_lines(&self) -> &[InvalidEnvLine] {
        &self.invalid_lines
    }
}

/// Parse a single `KEY=VALUE` line
fn parse_env_line(line: &str) -> Option<(String, String)> {
    // `export KEY=VALUE` is accepted too
    let line = line.strip_prefix("export ").unwrap_or(line);

    let eq_pos = line.find('=')?;

    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Key must start with a letter or underscore and contain only alphanumerics + underscore
    let first = key.chars().next()?;
    if !first.is_alphabetic() && first != '_' {
        return None;
    }

    if !key.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }

    let value = if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        &value[1..value.len() - 1]
    } else {
        value
    };

    Some((key.to_string(), value.to_string()))
}
