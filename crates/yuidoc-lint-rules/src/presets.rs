//! The YuiDoc preset and rule-set assembly from configuration.

use tracing::debug;
use yuidoc_lint_core::{
    Config, ConfigError, DeclarationKind, FileRuleBox, RuleBox, TagRuleConfig,
};

use crate::{AtLeastOneModule, BlockCommentSpacing, HeaderCommentSpacing, HeaderTags, ParamCount};

/// Per-block and per-file rules ready for the analyzer.
#[derive(Default)]
pub struct RuleSet {
    /// Rules run on every block.
    pub rules: Vec<RuleBox>,
    /// Rules run once per file.
    pub file_rules: Vec<FileRuleBox>,
}

impl RuleSet {
    /// Total number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len() + self.file_rules.len()
    }

    /// Returns true if the set holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keeps only rules whose name or code is in `selected`.
    pub fn retain(&mut self, selected: &[String]) {
        let keep = |name: &str, code: &str| selected.iter().any(|s| s == name || s == code);
        self.rules.retain(|r| keep(r.name(), r.code()));
        self.file_rules.retain(|r| keep(r.name(), r.code()));
    }
}

/// YuiDoc class header tags.
///
/// One of `@constructor` or `@static` is mandatory and `@class` leads.
#[must_use]
pub fn class_tags() -> TagRuleConfig {
    TagRuleConfig {
        required: vec!["@class".into()],
        rivaling: vec![vec!["@constructor".into(), "@static".into()]],
        relevant: ["@class", "@constructor", "@static", "@extends", "@namespace"]
            .into_iter()
            .map(String::from)
            .collect(),
        rivaling_mandatory: true,
        anchor: Some("@class".into()),
    }
}

/// YuiDoc method header tags.
#[must_use]
pub fn function_tags() -> TagRuleConfig {
    TagRuleConfig {
        required: vec!["@method".into(), "@return".into()],
        rivaling: Vec::new(),
        relevant: vec!["@method".into(), "@param".into(), "@return".into()],
        rivaling_mandatory: false,
        anchor: None,
    }
}

fn tag_rule(kind: DeclarationKind, options: &TagRuleConfig) -> Result<RuleBox, ConfigError> {
    let rule = options
        .build()
        .map_err(|source| ConfigError::InvalidRule { kind, source })?;
    Ok(Box::new(HeaderTags::new(kind, rule)))
}

/// Builds the rule set described by `config`.
///
/// Tag rules missing from `[tags]` fall back to the YuiDoc preset, except
/// the block rule, which only runs when configured. `[checks]` switches the
/// layout, parameter, and module rules on or off.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidRule`] when a configured tag rule is
/// inconsistent.
pub fn from_config(config: &Config) -> Result<RuleSet, ConfigError> {
    let mut set = RuleSet::default();

    let class = config.tags.class.clone().unwrap_or_else(class_tags);
    set.rules.push(tag_rule(DeclarationKind::Class, &class)?);

    let function = config.tags.function.clone().unwrap_or_else(function_tags);
    set.rules.push(tag_rule(DeclarationKind::Function, &function)?);

    if let Some(block) = &config.tags.block {
        set.rules.push(tag_rule(DeclarationKind::Block, block)?);
    }

    if config.checks.block_spacing {
        set.rules.push(Box::new(BlockCommentSpacing::new()));
    }
    if config.checks.header_spacing {
        set.rules.push(Box::new(HeaderCommentSpacing::new()));
    }
    if config.checks.param_count {
        set.rules.push(Box::new(ParamCount::new()));
    }
    if config.checks.require_module {
        set.file_rules.push(Box::new(AtLeastOneModule::new()));
    }

    debug!(
        "Assembled {} block rules and {} file rules",
        set.rules.len(),
        set.file_rules.len()
    );
    Ok(set)
}

/// Returns the YuiDoc preset with every check enabled.
///
/// # Errors
///
/// Never fails for the built-in preset; the error type is shared with
/// [`from_config`].
pub fn default_rules() -> Result<RuleSet, ConfigError> {
    from_config(&Config::default())
}

/// Returns every available rule, including the block rule with no tags.
///
/// # Errors
///
/// Never fails for the built-in preset; the error type is shared with
/// [`from_config`].
pub fn all_rules() -> Result<RuleSet, ConfigError> {
    let mut config = Config::default();
    config.tags.block = Some(TagRuleConfig::default());
    from_config(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(set: &RuleSet) -> Vec<&'static str> {
        set.rules
            .iter()
            .map(|r| r.code())
            .chain(set.file_rules.iter().map(|r| r.code()))
            .collect()
    }

    #[test]
    fn preset_tags_are_consistent() {
        assert!(class_tags().build().is_ok());
        assert!(function_tags().build().is_ok());
    }

    #[test]
    fn default_preset_enables_everything_but_block_tags() {
        let set = default_rules().unwrap();
        assert_eq!(
            codes(&set),
            vec!["YD001", "YD002", "YD004", "YD005", "YD006", "YD007"]
        );
    }

    #[test]
    fn all_rules_include_block_tags() {
        let set = all_rules().unwrap();
        assert_eq!(set.len(), 7);
        assert!(codes(&set).contains(&"YD003"));
    }

    #[test]
    fn checks_switch_rules_off() {
        let config = Config::parse(
            "[checks]\nblock_spacing = false\nparam_count = false\nrequire_module = false\n",
        )
        .unwrap();
        let set = from_config(&config).unwrap();
        assert_eq!(codes(&set), vec!["YD001", "YD002", "YD005"]);
    }

    #[test]
    fn inconsistent_tag_rule_is_a_config_error() {
        let config = Config::parse("[tags.function]\nrequired = [\"@foo\"]\nrelevant = [\"@bar\"]\n")
            .unwrap();
        let err = from_config(&config).err().unwrap();
        assert!(matches!(
            err,
            ConfigError::InvalidRule {
                kind: DeclarationKind::Function,
                ..
            }
        ));
        assert!(err.to_string().starts_with("Invalid [tags.function] rule"));
    }

    #[test]
    fn retain_filters_by_name_or_code() {
        let mut set = default_rules().unwrap();
        set.retain(&["param-count".to_string(), "YD007".to_string()]);
        assert_eq!(codes(&set), vec!["YD006", "YD007"]);
    }
}
