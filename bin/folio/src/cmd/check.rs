//! Check command - validate configuration and content

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use folio_core::Config;
use folio_pipeline::{ContentPipeline, FsContentStore, PageBatch};

use super::site_root;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Collected errors.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Collected warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration, content files and the page plan without
/// writing anything.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let result = validate(config_path);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Collect every problem with the site at `config_path`.
pub fn validate(config_path: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            println!("  ✗ Configuration invalid: {e}");
            result.add_error(format!("Configuration error: {e}"));
            return result;
        }
    };
    check_config_values(&config, &mut result);

    let pipeline = match ContentPipeline::from_config(&config) {
        Ok(p) => p,
        Err(e) => {
            result.add_error(e.to_string());
            return result;
        }
    };

    println!("\nChecking content files...");
    let root = site_root(config_path);
    let content_dir = root.join(&config.content.dir);
    if !content_dir.is_dir() {
        result.add_warning(format!(
            "Content directory does not exist: {}",
            content_dir.display()
        ));
    }

    let store = match FsContentStore::from_config(&config, root) {
        Ok(s) => {
            println!("  ✓ {} content files parsed", s.items().len());
            s
        }
        Err(e) => {
            println!("  ✗ Content could not be read");
            result.add_error(e.to_string());
            return result;
        }
    };

    println!("\nChecking pages...");
    match pipeline.build_all(&store) {
        Ok(batch) => {
            println!("  ✓ {} pages planned", batch.len());
            check_categories(&pipeline, &batch, &mut result);
        }
        Err(e) => {
            println!("  ✗ Page plan invalid");
            result.add_error(e.to_string());
        }
    }

    result
}

/// Check configuration values for common issues.
fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if !config.site.base_url.starts_with("http") {
        result.add_warning("site.base_url should start with http:// or https://");
    }

    if config.categories.is_empty() {
        result.add_warning("No categories configured, no pages will be planned");
    }
}

/// Warn about empty categories and items without a sort key.
fn check_categories(pipeline: &ContentPipeline, batch: &PageBatch, result: &mut ValidationResult) {
    for category in pipeline.categories() {
        let mut count = 0;
        for page in batch.sequence(&category.name) {
            count += 1;
            if page.context.item.sort_key.is_none() {
                result.add_warning(format!(
                    "{}: missing '{}', ordered after keyed items",
                    page.context.item.source_path, category.ordering.field
                ));
            }
        }
        if count == 0 {
            result.add_warning(format!(
                "Category '{}' ({}) has no content",
                category.name, category.matcher
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const CONFIG: &str = r#"
[site]
title = "Test"
base_url = "https://example.com"

[[categories]]
name = "post"
directory = "blog"
renderer = "blog-post"
"#;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, content).expect("write");
    }

    #[test]
    fn test_clean_site_passes() {
        let dir = TempDir::new().expect("tempdir");
        write(dir.path(), "folio.toml", CONFIG);
        write(dir.path(), "content/blog/a.md", "---\ntitle: A\ndate: 2020-01-01\n---\n");

        let result = validate(&dir.path().join("folio.toml"));
        assert!(result.errors().is_empty());
        assert!(result.warnings().is_empty());
        assert!(run(&dir.path().join("folio.toml"), true).is_ok());
    }

    #[test]
    fn test_undated_items_warn() {
        let dir = TempDir::new().expect("tempdir");
        write(dir.path(), "folio.toml", CONFIG);
        write(dir.path(), "content/blog/a.md", "---\ntitle: A\n---\n");

        let result = validate(&dir.path().join("folio.toml"));
        assert!(result.errors().is_empty());
        assert_eq!(result.warnings().len(), 1);
        assert!(result.warnings()[0].contains("missing 'date'"));

        assert!(run(&dir.path().join("folio.toml"), false).is_ok());
        assert!(run(&dir.path().join("folio.toml"), true).is_err());
    }

    #[test]
    fn test_slug_collision_is_error() {
        let dir = TempDir::new().expect("tempdir");
        write(dir.path(), "folio.toml", CONFIG);
        write(dir.path(), "content/blog/a.md", "---\ntitle: A\n---\n");
        write(dir.path(), "content/blog/a/index.md", "---\ntitle: A again\n---\n");

        let result = validate(&dir.path().join("folio.toml"));
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors()[0].contains("slug collision"));
    }

    #[test]
    fn test_missing_config_is_error() {
        let dir = TempDir::new().expect("tempdir");
        let result = validate(&dir.path().join("folio.toml"));
        assert_eq!(result.errors().len(), 1);
    }
}
