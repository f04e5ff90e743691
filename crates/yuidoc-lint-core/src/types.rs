//! Core types for lint violations and results.

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::token::Token;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warning that should be addressed; never fails a run.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to project root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Creates a location covering `token`.
    #[must_use]
    pub fn from_token(file: PathBuf, token: &Token) -> Self {
        Self::new(file, token.line, token.column).with_span(token.offset, token.text.len())
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A suggested fix for a violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Human-readable description of the fix.
    pub message: String,
}

impl Suggestion {
    /// Creates a new suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Substitutes each `%s` in `template` with the next argument.
///
/// Surplus placeholders are left as they are; surplus arguments are ignored.
#[must_use]
pub fn render_template(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(idx) = rest.find("%s") {
        out.push_str(&rest[..idx]);
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str("%s"),
        }
        rest = &rest[idx + 2..];
    }
    out.push_str(rest);
    out
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "YD001").
    pub code: String,
    /// Rule name (e.g., "class-header-tags").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Location of the comment block the violation belongs to.
    pub location: Location,
    /// Human-readable message, rendered from the template.
    pub message: String,
    /// Arguments substituted into the message template.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Optional suggestion for fixing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Creates a new violation with a literal message.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
            args: Vec::new(),
            suggestion: None,
        }
    }

    /// Creates a new violation from a `%s` template and its arguments.
    #[must_use]
    pub fn templated(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        template: &str,
        args: Vec<String>,
    ) -> Self {
        let message = render_template(template, &args);
        Self {
            args,
            ..Self::new(code, rule, severity, location, message)
        }
    }

    /// Adds a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Sort key used to normalize report order.
    fn sort_key(&self) -> (&PathBuf, usize, usize, &str, &str) {
        (
            &self.location.file,
            self.location.line,
            self.location.column,
            self.code.as_str(),
            self.message.as_str(),
        )
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// A violation rendered as a miette diagnostic with its source snippet.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("[{code}] {message}")]
pub struct ViolationDiagnostic {
    code: String,
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
    #[source_code]
    source_code: NamedSource<String>,
}

impl ViolationDiagnostic {
    /// Builds a diagnostic for `violation` over the file's `source`.
    #[must_use]
    pub fn new(violation: &Violation, source: String) -> Self {
        let name = violation.location.file.display().to_string();
        Self {
            code: violation.code.clone(),
            message: violation.message.clone(),
            help: violation.suggestion.as_ref().map(|s| s.message.clone()),
            span: SourceSpan::from((violation.location.offset, violation.location.length)),
            label_message: violation.rule.clone(),
            source_code: NamedSource::new(name, source),
        }
    }
}

/// A file that could not be analyzed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFailure {
    /// Path of the file.
    pub file: PathBuf,
    /// Why the file failed.
    pub reason: String,
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
    /// Files that could not be read or tokenized.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FileFailure>,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    /// Returns true if the run should exit non-zero: any error or failed file.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.has_errors() || !self.failures.is_empty()
    }

    /// Counts violations by severity as `(errors, warnings)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        let errors = self
            .violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count();
        (errors, self.violations.len() - errors)
    }

    /// Sorts violations by file, position, code and message.
    pub fn sort(&mut self) {
        self.violations.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        self.failures.sort_by(|a, b| a.file.cmp(&b.file));
    }
}

/// Sorts violations into report order.
pub fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}
