//! Check command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use yuidoc_lint_core::{Analyzer, Config, LintResult, RuleConfig, MALFORMED_CODE, MALFORMED_NAME};
use yuidoc_lint_js::JsTokenizer;
use yuidoc_lint_rules::{all_rules, from_config};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<()> {
    let config = load_config(source)?;
    let (analyzer, result) = execute(path, config, rules_filter.as_deref(), exclude)?;

    super::output::print(&result, format, &analyzer)?;

    if result.is_failure() {
        std::process::exit(1);
    }

    Ok(())
}

/// Loads the configuration the resolver pointed at.
pub fn load_config(source: &ConfigSource) -> Result<Config> {
    let config = match source {
        ConfigSource::Default => Config::default(),
        other => {
            let p = other.path().context("resolved config has no path")?;
            if matches!(source, ConfigSource::User(_)) {
                tracing::info!("Using user config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))?
        }
    };
    Ok(config)
}

/// Builds the analyzer for `path` and runs it.
pub fn execute(
    path: &Path,
    mut config: Config,
    rules_filter: Option<&str>,
    exclude: Vec<String>,
) -> Result<(Analyzer, LintResult)> {
    let mut set = from_config(&config).context("Invalid rule configuration")?;

    if let Some(filter) = rules_filter {
        let selected: Vec<String> = filter
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        warn_unknown(&selected)?;
        set.retain(&selected);
        if !selected
            .iter()
            .any(|s| s == MALFORMED_NAME || s == MALFORMED_CODE)
        {
            config.rules.insert(
                MALFORMED_NAME.to_string(),
                RuleConfig {
                    enabled: Some(false),
                    severity: None,
                },
            );
        }
    }

    let mut builder = Analyzer::builder()
        .root(path)
        .tokenizer(JsTokenizer::new())
        .config(config);

    for pattern in exclude {
        builder = builder.exclude(pattern);
    }
    for rule in set.rules {
        builder = builder.rule_box(rule);
    }
    for rule in set.file_rules {
        builder = builder.file_rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let result = analyzer.analyze().context("Analysis failed")?;
    Ok((analyzer, result))
}

fn warn_unknown(selected: &[String]) -> Result<()> {
    let known = all_rules().context("Built-in rules failed to load")?;
    for name in selected {
        let exists = name == MALFORMED_NAME
            || name == MALFORMED_CODE
            || known.rules.iter().any(|r| r.name() == name || r.code() == name)
            || known
                .file_rules
                .iter()
                .any(|r| r.name() == name || r.code() == name);
        if !exists {
            tracing::warn!("Unknown rule: {}", name);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const GOOD: &str = "/**
 * A square.
 *
 * @module shapes
 * @class Square
 * @constructor
 */
Square = Base.extend({
    /**
     * Scales the square.
     *
     * @method scale
     * @param {Number} factor
     * @return {Square}
     */
    scale: function (factor) {}
});
";

    const BAD: &str = "/**
 * Circles.
 * @class Circle
 */
Circle = Base.extend({
    /**
     * Grows the circle.
     *
     * @method grow
     * @return {Circle}
     */
    grow: function (a, b) {}
});
";

    fn project() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("src/square.js"), GOOD).unwrap();
        fs::write(tmp.path().join("src/circle.js"), BAD).unwrap();
        fs::create_dir(tmp.path().join("node_modules")).unwrap();
        fs::write(tmp.path().join("node_modules/dep.js"), BAD).unwrap();
        fs::write(tmp.path().join("notes.txt"), "not javascript").unwrap();
        tmp
    }

    fn compact(result: &LintResult) -> Vec<String> {
        result.violations.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn checks_javascript_files_under_root() {
        let tmp = project();
        let (_, result) = execute(tmp.path(), Config::default(), None, vec![]).unwrap();

        assert_eq!(result.files_checked, 2);
        assert_eq!(
            compact(&result),
            vec![
                "src/circle.js:1:1: error [YD001] You need at least one of these tags: @constructor, @static.",
                "src/circle.js:1:1: error [YD004] There must be exactly one empty line between the doc comment and the first tag.",
                "src/circle.js:1:1: warning [YD005] There must be exactly one empty line between the doc comment and the first tag.",
                "src/circle.js:1:1: error [YD007] The @module tag seems to be missing. It is needed at least once.",
                "src/circle.js:6:5: error [YD006] Parameter count mismatch: expected 2, documented 0.",
            ]
        );
        assert!(result.is_failure());
    }

    #[test]
    fn rules_filter_limits_the_run() {
        let tmp = project();
        let (_, result) =
            execute(tmp.path(), Config::default(), Some("YD006, at-least-one-module"), vec![])
                .unwrap();
        let codes: Vec<&str> = result.violations.iter().map(|v| v.code.as_str()).collect();
        assert_eq!(codes, vec!["YD007", "YD006"]);
    }

    #[test]
    fn exclude_patterns_skip_files() {
        let tmp = project();
        let (_, result) = execute(
            tmp.path(),
            Config::default(),
            None,
            vec!["**/circle.js".to_string()],
        )
        .unwrap();
        assert_eq!(result.files_checked, 1);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn project_config_is_loaded() {
        let tmp = project();
        fs::write(
            tmp.path().join("yuidoc-lint.toml"),
            "[checks]\nrequire_module = false\nblock_spacing = false\n",
        )
        .unwrap();
        let source = crate::config_resolver::resolve(tmp.path(), None);
        let config = load_config(&source).unwrap();
        let (_, result) = execute(tmp.path(), config, None, vec![]).unwrap();
        assert!(result.violations.iter().all(|v| v.code != "YD007" && v.code != "YD004"));
    }

    #[test]
    fn invalid_tag_rule_fails_loading() {
        let tmp = project();
        let config =
            Config::parse("[tags.class]\nrequired = [\"@class\"]\nrelevant = [\"@static\"]\n")
                .unwrap();
        let err = execute(tmp.path(), config, None, vec![]).err().unwrap();
        assert!(format!("{err:#}").contains("Invalid [tags.class] rule"));
    }

    #[test]
    fn unreadable_file_is_a_failure() {
        let tmp = project();
        fs::write(tmp.path().join("src/binary.js"), [0xff, 0xfe, 0x00]).unwrap();
        let (_, result) = execute(tmp.path(), Config::default(), None, vec![]).unwrap();
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].file, Path::new("src/binary.js"));
        assert_eq!(result.files_checked, 2);
    }
}
