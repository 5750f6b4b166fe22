use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_CONFIG_FILE;
use crate::error::{FixerError, Result};
use crate::rules::{PatternRule, RuleSet};

/// Optional settings read from `fix-imports.toml`.
///
/// Every scan setting is optional so command-line flags can take precedence.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub root: Option<PathBuf>,
    pub extensions: Option<Vec<String>>,
    pub recursive: Option<bool>,
    pub always_write: Option<bool>,
    pub log_dir: Option<PathBuf>,
    #[serde(default = "default_builtin_rules")]
    pub builtin_rules: bool,
    #[serde(default)]
    pub packages: Vec<String>,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub pattern: String,
    pub replacement: String,
}

fn default_builtin_rules() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: None,
            extensions: None,
            recursive: None,
            always_write: None,
            log_dir: None,
            builtin_rules: default_builtin_rules(),
            packages: Vec::new(),
            rules: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `fix-imports.toml` in the
    /// working directory is used when present, otherwise defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FixerError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Build the ordered rule set: built-ins, then extra packages, then raw rules.
    pub fn rule_set(&self) -> Result<RuleSet> {
        let mut rules = if self.builtin_rules {
            RuleSet::builtin()?
        } else {
            RuleSet::new()
        };
        for name in &self.packages {
            rules.push(PatternRule::for_package(name)?);
        }
        for rule in &self.rules {
            rules.push(PatternRule::new(&rule.pattern, rule.replacement.clone())?);
        }
        if rules.is_empty() {
            return Err(FixerError::Config("No rules configured".to_string()));
        }
        Ok(rules)
    }
}
