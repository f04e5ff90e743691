//! Configuration types for yuidoc-lint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::classify::DeclarationKind;
use crate::tag_rule::{RuleConfigError, TagRule};

/// Top-level configuration for yuidoc-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Which optional checks run.
    #[serde(default)]
    pub checks: ChecksConfig,

    /// Tag rules per declaration kind. Missing kinds fall back to the preset.
    #[serde(default)]
    pub tags: TagsConfig,

    /// Per-rule overrides, keyed by rule name or code.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled, looking it up by name and then by code.
    #[must_use]
    pub fn is_rule_enabled(&self, name: &str, code: &str) -> bool {
        self.rule_config(name, code)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, name: &str, code: &str) -> Option<crate::Severity> {
        self.rule_config(name, code).and_then(|c| c.severity)
    }

    fn rule_config(&self, name: &str, code: &str) -> Option<&RuleConfig> {
        self.rules.get(name).or_else(|| self.rules.get(code))
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Maximum number of parallel file analyses.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: vec!["**/node_modules/**".to_string(), "**/build/**".to_string()],
            respect_gitignore: true,
            parallelism: None,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

/// Toggles for the checks that are not tag rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecksConfig {
    /// Prose/tag spacing on every block.
    #[serde(default = "default_true")]
    pub block_spacing: bool,
    /// Prose/tag spacing on class headers, reported as warnings.
    #[serde(default = "default_true")]
    pub header_spacing: bool,
    /// `@param` count against the declared parameter list.
    #[serde(default = "default_true")]
    pub param_count: bool,
    /// At least one `@module` tag per file.
    #[serde(default = "default_true")]
    pub require_module: bool,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            block_spacing: true,
            header_spacing: true,
            param_count: true,
            require_module: true,
        }
    }
}

/// Tag rule options per declaration kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagsConfig {
    /// Rule for class headers.
    #[serde(default)]
    pub class: Option<TagRuleConfig>,
    /// Rule for function headers.
    #[serde(default)]
    pub function: Option<TagRuleConfig>,
    /// Rule for every block.
    #[serde(default)]
    pub block: Option<TagRuleConfig>,
}

impl TagsConfig {
    /// Options configured for `kind`, if any.
    #[must_use]
    pub fn get(&self, kind: DeclarationKind) -> Option<&TagRuleConfig> {
        match kind {
            DeclarationKind::Class => self.class.as_ref(),
            DeclarationKind::Function => self.function.as_ref(),
            DeclarationKind::Block => self.block.as_ref(),
        }
    }
}

/// Raw TOML representation of a tag rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRuleConfig {
    /// Tags that must appear.
    #[serde(default)]
    pub required: Vec<String>,
    /// Groups of mutually exclusive tags.
    #[serde(default)]
    pub rivaling: Vec<Vec<String>>,
    /// Tags the rule looks at.
    #[serde(default)]
    pub relevant: Vec<String>,
    /// Whether each rivaling group needs one member present.
    #[serde(default)]
    pub rivaling_mandatory: bool,
    /// Tag that must precede rival tags.
    #[serde(default)]
    pub anchor: Option<String>,
}

impl TagRuleConfig {
    /// Validates the options into a [`TagRule`].
    ///
    /// # Errors
    ///
    /// Returns [`RuleConfigError`] when the options violate a rule invariant.
    pub fn build(&self) -> Result<TagRule, RuleConfigError> {
        let mut builder = TagRule::builder()
            .relevant(self.relevant.iter().cloned())
            .required(self.required.iter().cloned())
            .rivaling_mandatory(self.rivaling_mandatory);
        for group in &self.rivaling {
            builder = builder.rivaling(group.iter().cloned());
        }
        if let Some(anchor) = &self.anchor {
            builder = builder.anchor(anchor.clone());
        }
        builder.build()
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<crate::Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A tag rule violates its invariants.
    #[error("Invalid [tags.{kind}] rule: {source}")]
    InvalidRule {
        /// Declaration kind of the rule.
        kind: DeclarationKind,
        /// The underlying rule error.
        source: RuleConfigError,
    },
}
