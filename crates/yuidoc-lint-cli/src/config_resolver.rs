//! Locating the configuration that applies to a checked path.
//!
//! An explicit `--config` always wins. Otherwise the search starts at the
//! checked directory (or the directory holding a checked file) and walks up
//! its ancestors to the nearest `yuidoc-lint.toml` or `.yuidoc-lint.toml`.
//! The walk ends at the project root, the first directory that has a
//! `package.json` or `.git` entry. Without a project config, the user config
//! under `$YUIDOC_LINT_CONFIG_DIR` or `~/.yuidoc-lint/` is used.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`; not checked for existence.
    Explicit(PathBuf),
    /// Nearest config among the checked path and its ancestors.
    Project(PathBuf),
    /// The per-user config file.
    User(PathBuf),
    /// Nothing found; built-in defaults apply.
    Default,
}

impl ConfigSource {
    /// Returns the config file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::User(p) => Some(p),
            Self::Default => None,
        }
    }
}

const CONFIG_NAMES: &[&str] = &["yuidoc-lint.toml", ".yuidoc-lint.toml"];

/// Entries that mark the root of a JavaScript project.
const PROJECT_ROOT_MARKERS: &[&str] = &["package.json", ".git"];

const USER_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration for a check of `path`.
#[must_use]
pub fn resolve(path: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_with(path, explicit, user_config_dir())
}

fn resolve_with(path: &Path, explicit: Option<&Path>, user_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    let start = if path.is_file() {
        path.parent().unwrap_or(path)
    } else {
        path
    };
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());

    if let Some(found) = find_project_config(&start) {
        return ConfigSource::Project(found);
    }

    user_dir
        .map(|dir| dir.join(USER_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
        .map_or(ConfigSource::Default, |candidate| {
            debug!("Using user config: {}", candidate.display());
            ConfigSource::User(candidate)
        })
}

/// Walks from `start` towards the filesystem root looking for a config file.
///
/// Returns `None` once a project root has been searched without success.
#[must_use]
pub fn find_project_config(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let found = CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file());
        if let Some(found) = found {
            debug!("Found project config: {}", found.display());
            return Some(found);
        }
        if PROJECT_ROOT_MARKERS.iter().any(|m| dir.join(m).exists()) {
            debug!("No config up to project root {}", dir.display());
            return None;
        }
    }
    None
}

/// `$YUIDOC_LINT_CONFIG_DIR`, or `~/.yuidoc-lint`.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    match std::env::var_os("YUIDOC_LINT_CONFIG_DIR") {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|h| h.join(".yuidoc-lint")),
    }
}
