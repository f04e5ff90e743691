//! Shared output formatting for lint results.

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;
use yuidoc_lint_core::{Analyzer, FileFailure, LintResult, Severity, Violation, ViolationDiagnostic};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat, analyzer: &Analyzer) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(result)),
        OutputFormat::Json => println!("{}", render_json(result)?),
        OutputFormat::Compact => print!("{}", render_compact(result)),
        OutputFormat::Rich => print_rich(result, analyzer),
    }
    Ok(())
}

fn severity_indicator(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
    }
}

fn summary(result: &LintResult) -> String {
    let (errors, warnings) = result.count_by_severity();
    let color = if errors > 0 || !result.failures.is_empty() {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    let mut line = format!(
        "{color}Found {errors} error(s), {warnings} warning(s) in {} file(s)",
        result.files_checked
    );
    if !result.failures.is_empty() {
        let _ = write!(line, ", {} file(s) failed", result.failures.len());
    }
    line.push_str("\x1b[0m\n");
    line
}

fn render_failures(out: &mut String, failures: &[FileFailure]) {
    for failure in failures {
        let _ = writeln!(
            out,
            "{} {}: {}",
            severity_indicator(Severity::Error),
            failure.file.display(),
            failure.reason
        );
    }
}

/// Human-readable report with a summary line.
pub fn render_text(result: &LintResult) -> String {
    let mut out = String::new();
    for violation in &result.violations {
        let _ = writeln!(
            out,
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        let _ = writeln!(
            out,
            "  {}: {}",
            severity_indicator(violation.severity),
            violation.message
        );
        if let Some(suggestion) = &violation.suggestion {
            let _ = writeln!(out, "  = help: {}", suggestion.message);
        }
        out.push('\n');
    }
    render_failures(&mut out, &result.failures);
    out.push_str(&summary(result));
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files_checked: usize,
    errors: usize,
    warnings: usize,
    violations: &'a [Violation],
    #[serde(skip_serializing_if = "no_failures")]
    failures: &'a [FileFailure],
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn no_failures(failures: &&[FileFailure]) -> bool {
    failures.is_empty()
}

/// Pretty-printed JSON report.
pub fn render_json(result: &LintResult) -> Result<String> {
    let (errors, warnings) = result.count_by_severity();
    let report = JsonReport {
        files_checked: result.files_checked,
        errors,
        warnings,
        violations: &result.violations,
        failures: &result.failures,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// One line per violation, `file:line:col: severity [code] message`.
pub fn render_compact(result: &LintResult) -> String {
    let mut out = String::new();
    for violation in &result.violations {
        let _ = writeln!(out, "{violation}");
    }
    for failure in &result.failures {
        let _ = writeln!(out, "{}: error {}", failure.file.display(), failure.reason);
    }
    out
}

fn print_rich(result: &LintResult, analyzer: &Analyzer) {
    for violation in &result.violations {
        let path = analyzer.source_path(&violation.location.file);
        match std::fs::read_to_string(&path) {
            Ok(source) => {
                let report = miette::Report::new(ViolationDiagnostic::new(violation, source));
                eprintln!("{report:?}");
            }
            Err(e) => {
                tracing::debug!("Cannot read {} for snippet: {}", path.display(), e);
                eprintln!("{violation}");
            }
        }
    }
    let mut tail = String::new();
    render_failures(&mut tail, &result.failures);
    eprint!("{tail}");
    eprint!("{}", summary(result));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use yuidoc_lint_core::{Location, Suggestion};

    fn sample() -> LintResult {
        let mut result = LintResult::new();
        result.files_checked = 2;
        result.violations.push(
            Violation::new(
                "YD001",
                "class-header-tags",
                Severity::Error,
                Location::new(PathBuf::from("src/widget.js"), 3, 1),
                "Missing required tag @class.",
            )
            .with_suggestion(Suggestion::new("Add a @class tag to the comment")),
        );
        result.violations.push(Violation::new(
            "YD005",
            "header-comment-spacing",
            Severity::Warning,
            Location::new(PathBuf::from("src/widget.js"), 3, 1),
            "There must be exactly one empty line between the doc comment and the first tag.",
        ));
        result
    }

    #[test]
    fn compact_is_one_line_per_violation() {
        insta::assert_snapshot!(render_compact(&sample()), @r"
        src/widget.js:3:1: error [YD001] Missing required tag @class.
        src/widget.js:3:1: warning [YD005] There must be exactly one empty line between the doc comment and the first tag.
        ");
    }

    #[test]
    fn text_includes_help_and_summary() {
        let text = render_text(&sample());
        assert!(text.contains("YD001 class-header-tags at src/widget.js:3:1"));
        assert!(text.contains("= help: Add a @class tag to the comment"));
        assert!(text.contains("Found 1 error(s), 1 warning(s) in 2 file(s)"));
    }

    #[test]
    fn json_carries_counts() {
        let json: serde_json::Value = serde_json::from_str(&render_json(&sample()).unwrap()).unwrap();
        assert_eq!(json["errors"], 1);
        assert_eq!(json["warnings"], 1);
        assert_eq!(json["violations"][0]["code"], "YD001");
        assert_eq!(json["violations"][1]["severity"], "warning");
        assert!(json.get("failures").is_none());
    }

    #[test]
    fn failures_are_listed() {
        let mut result = sample();
        result.failures.push(FileFailure {
            file: PathBuf::from("broken.js"),
            reason: "stream did not contain valid UTF-8".into(),
        });
        assert!(render_compact(&result).ends_with("broken.js: error stream did not contain valid UTF-8\n"));
        assert!(render_text(&result).contains("1 file(s) failed"));
    }
}
