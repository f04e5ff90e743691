//! Core analyzer for orchestrating lint execution.

use crate::classify::DeclarationRegion;
use crate::comment::{extract, CommentBlock};
use crate::config::Config;
use crate::context::{BlockContext, FileContext, SourceTokens};
use crate::rule::{FileRule, FileRuleBox, Rule, RuleBox};
use crate::sink::DiagnosticSink;
use crate::tokenizer::{TokenizeError, Tokenizer};
use crate::types::{FileFailure, LintResult, Severity, Violation};

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Rule code reported for doc comments that are never closed.
pub const MALFORMED_CODE: &str = "YD000";

/// Rule name reported for doc comments that are never closed.
pub const MALFORMED_NAME: &str = "malformed-comment";

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error tokenizing a source file.
    #[error("Tokenize error in {path}: {source}")]
    Tokenize {
        /// Path to the file that failed to tokenize.
        path: PathBuf,
        /// Underlying tokenizer error.
        source: TokenizeError,
    },

    /// No tokenizer handles the file's extension.
    #[error("No tokenizer registered for {0}")]
    UnsupportedFile(PathBuf),

    /// Directory walk error.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Thread pool setup error.
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    file_rules: Vec<FileRuleBox>,
    tokenizers: Vec<Box<dyn Tokenizer>>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a per-block rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed per-block rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds a per-file rule to the analyzer.
    #[must_use]
    pub fn file_rule<R: FileRule + 'static>(mut self, rule: R) -> Self {
        self.file_rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed per-file rule to the analyzer.
    #[must_use]
    pub fn file_rule_box(mut self, rule: FileRuleBox) -> Self {
        self.file_rules.push(rule);
        self
    }

    /// Registers a tokenizer for the extensions it declares.
    #[must_use]
    pub fn tokenizer<T: Tokenizer + 'static>(mut self, tokenizer: T) -> Self {
        self.tokenizers.push(Box::new(tokenizer));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.analyzer.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let config = self.config.unwrap_or_default();

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());

        Ok(Analyzer {
            root,
            rules: self.rules,
            file_rules: self.file_rules,
            tokenizers: self.tokenizers,
            exclude_patterns,
            config,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    file_rules: Vec<FileRuleBox>,
    tokenizers: Vec<Box<dyn Tokenizer>>,
    exclude_patterns: Vec<String>,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len() + self.file_rules.len()
    }

    /// Analyzes all files under the root and returns the results.
    ///
    /// Files that cannot be read or tokenized are recorded in
    /// [`LintResult::failures`]; they never abort the run.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or thread pool setup fails.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        let result = match self.config.analyzer.parallelism {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(|| self.analyze_files(&files)),
            None => self.analyze_files(&files),
        };

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Analyzes the given files in parallel.
    #[must_use]
    pub fn analyze_files(&self, files: &[PathBuf]) -> LintResult {
        let outcomes: Vec<(PathBuf, Result<Vec<Violation>, AnalyzerError>)> = files
            .par_iter()
            .map(|path| (path.clone(), self.analyze_path(path)))
            .collect();

        let mut result = LintResult::new();
        for (path, outcome) in outcomes {
            match outcome {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(e) => {
                    warn!("Failed to analyze {}: {}", path.display(), e);
                    result.failures.push(FileFailure {
                        file: self.relative(&path),
                        reason: e.to_string(),
                    });
                }
            }
        }

        result.sort();
        result
    }

    /// Reads, tokenizes and analyzes one file.
    fn analyze_path(&self, path: &Path) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let tokenizer = self
            .tokenizer_for(path)
            .ok_or_else(|| AnalyzerError::UnsupportedFile(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path)?;
        self.analyze_source(&self.relative(path), &content, tokenizer)
    }

    /// Tokenizes `source` and analyzes it as the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Tokenize`] when the tokenizer rejects the source.
    pub fn analyze_source(
        &self,
        path: &Path,
        source: &str,
        tokenizer: &dyn Tokenizer,
    ) -> Result<Vec<Violation>, AnalyzerError> {
        let stream = tokenizer
            .tokenize(source)
            .map_err(|err| AnalyzerError::Tokenize {
                path: path.to_path_buf(),
                source: err,
            })?;
        Ok(self.analyze_stream(path, &stream))
    }

    /// Runs every rule over an already tokenized file.
    ///
    /// The class boundary is resolved before blocks fan out to worker
    /// threads. Output is sorted, so repeated runs are identical.
    #[must_use]
    pub fn analyze_stream(&self, path: &Path, tokens: &dyn SourceTokens) -> Vec<Violation> {
        let ctx = FileContext::new(path, tokens);
        ctx.classifier.class_boundary();

        let sink = DiagnosticSink::new();

        let blocks: Vec<CommentBlock> = tokens
            .comment_openers()
            .par_iter()
            .filter_map(|&open| match extract(tokens, open) {
                Ok(block) => Some(block),
                Err(err) => {
                    debug!("Skipping malformed comment in {}: {}", path.display(), err);
                    if let Some(v) = self.malformed_violation(&ctx, open) {
                        sink.push(v);
                    }
                    None
                }
            })
            .collect();

        blocks.par_iter().for_each(|block| {
            let region = ctx.classifier.classify(block.open);
            if region == DeclarationRegion::None {
                debug!(
                    "Block at token {} in {} documents no declaration",
                    block.open,
                    path.display()
                );
            }
            let block_ctx = BlockContext {
                file: &ctx,
                block,
                region,
            };
            for rule in &self.rules {
                if !self.config.is_rule_enabled(rule.name(), rule.code()) {
                    continue;
                }
                let violations = rule.check(&block_ctx);
                sink.extend(self.apply_severity_override(rule.name(), rule.code(), violations));
            }
        });

        for rule in &self.file_rules {
            if !self.config.is_rule_enabled(rule.name(), rule.code()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }
            let violations = rule.check_file(&ctx, &blocks);
            sink.extend(self.apply_severity_override(rule.name(), rule.code(), violations));
        }

        sink.into_sorted()
    }

    fn malformed_violation(&self, ctx: &FileContext, open: usize) -> Option<Violation> {
        if !self.config.is_rule_enabled(MALFORMED_NAME, MALFORMED_CODE) {
            return None;
        }
        let severity = self
            .config
            .rule_severity(MALFORMED_NAME, MALFORMED_CODE)
            .unwrap_or(Severity::Error);
        Some(Violation::new(
            MALFORMED_CODE,
            MALFORMED_NAME,
            severity,
            ctx.location(open),
            "Doc comment is never closed.",
        ))
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        name: &str,
        code: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(name, code) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    fn tokenizer_for(&self, path: &Path) -> Option<&dyn Tokenizer> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        self.tokenizers
            .iter()
            .find(|t| t.extensions().contains(&ext))
            .map(|t| &**t)
    }

    /// Path of `path` relative to the root, as used in reported locations.
    ///
    /// When the root is the file itself, its file name is used.
    #[must_use]
    pub fn relative(&self, path: &Path) -> PathBuf {
        match path.strip_prefix(&self.root) {
            Ok(rel) if rel.as_os_str().is_empty() => path
                .file_name()
                .map_or_else(|| path.to_path_buf(), PathBuf::from),
            Ok(rel) => rel.to_path_buf(),
            Err(_) => path.to_path_buf(),
        }
    }

    /// Inverse of [`Analyzer::relative`]: the on-disk path of a reported file.
    #[must_use]
    pub fn source_path(&self, reported: &Path) -> PathBuf {
        if self.root.is_file() {
            self.root.clone()
        } else {
            self.root.join(reported)
        }
    }

    /// Discovers all source files some tokenizer can handle.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || self.tokenizer_for(path).is_none() {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude_patterns {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
            }

            // Also check as substring for patterns like "**/node_modules/**"
            let normalized_pattern = pattern.replace("**", "");
            if !normalized_pattern.is_empty()
                && normalized_pattern != "/"
                && path_str.contains(&normalized_pattern)
            {
                return true;
            }
        }

        false
    }
}
