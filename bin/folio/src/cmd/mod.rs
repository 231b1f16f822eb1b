//! CLI command implementations.

pub mod build;
pub mod check;
pub mod new;

use std::path::Path;

/// Directory that relative paths in `config_path` are resolved against.
pub(crate) fn site_root(config_path: &Path) -> &Path {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
