//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

const CONFIG_NAME: &str = "yuidoc-lint.toml";

const DEFAULT_CONFIG: &str = r#"# yuidoc-lint configuration

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/build/**",
    "**/*.min.js",
]

# Respect .gitignore files
respect_gitignore = true

# Number of files analyzed in parallel (default: one per CPU)
# parallelism = 4

[checks]
# Prose and one empty line before the tags of every doc comment (YD004)
block_spacing = true
# The same layout on class headers, reported as warnings (YD005)
header_spacing = true
# One @param per declared function parameter (YD006)
param_count = true
# At least one @module tag per file (YD007)
require_module = true

# Tag rules per declaration kind. Omitted kinds use the YuiDoc preset.
[tags.class]
required = ["@class"]
rivaling = [["@constructor", "@static"]]
relevant = ["@class", "@constructor", "@static", "@extends", "@namespace"]
rivaling_mandatory = true
anchor = "@class"

[tags.function]
required = ["@method", "@return"]
relevant = ["@method", "@param", "@return"]

# Checked on every doc comment when present
# [tags.block]
# required = ["@since"]
# relevant = ["@since"]

# Per-rule overrides, by name or code
# [rules.param-count]
# enabled = true
# severity = "warning"
"#;

/// Writes the default configuration into `dir`.
pub fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("."), force)?;

    println!("Created {CONFIG_NAME}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_NAME} to configure rules");
    println!("  2. Run: yuidoc-lint check");

    Ok(())
}
