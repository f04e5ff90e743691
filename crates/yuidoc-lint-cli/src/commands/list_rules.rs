//! List rules command implementation.

use anyhow::{Context, Result};
use yuidoc_lint_core::{MALFORMED_CODE, MALFORMED_NAME};
use yuidoc_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() -> Result<()> {
    let set = all_rules().context("Built-in rules failed to load")?;

    println!("Available rules:\n");
    println!("{:<8} {:<25} {:<9} Description", "Code", "Name", "Severity");
    println!("{}", "-".repeat(90));

    println!(
        "{:<8} {:<25} {:<9} {}",
        MALFORMED_CODE, MALFORMED_NAME, "error", "Reports doc comments that are never closed"
    );
    for rule in &set.rules {
        println!(
            "{:<8} {:<25} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }
    for rule in &set.file_rules {
        println!(
            "{:<8} {:<25} {:<9} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    println!("\nblock-tags (YD003) only runs when [tags.block] is configured.");
    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  yuidoc-lint check --rules class-header-tags,param-count");
    println!("  yuidoc-lint check --rules YD001,YD006");

    Ok(())
}
