//! Site configuration management.

use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for Folio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Content discovery settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Category definitions. The original site layout is used when empty.
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryConfig>,

    /// Renderer registry settings.
    #[serde(default)]
    pub renderers: RendererConfig,

    /// Advent calendar settings.
    #[serde(default)]
    pub calendar: Option<CalendarConfig>,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,

    /// Site author name.
    #[serde(default)]
    pub author: Option<String>,
}

/// Content discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding the content files.
    #[serde(default = "default_content_dir")]
    pub dir: String,

    /// File extensions treated as content.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Whether to include drafts.
    #[serde(default)]
    pub drafts: bool,
}

/// A single content category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Category tag, e.g. "post" or "recipe".
    pub name: String,

    /// Directory segment selecting membership, e.g. "blog".
    #[serde(default)]
    pub directory: Option<String>,

    /// Regular expression over the source path, used instead of `directory`.
    #[serde(default)]
    pub pattern: Option<String>,

    /// Extensions accepted for this category. Falls back to `content.extensions`.
    #[serde(default)]
    pub extensions: Option<Vec<String>>,

    /// Renderer identifier handed to the page builder.
    pub renderer: String,

    /// Optional slug prefix substitution.
    #[serde(default)]
    pub slug_rewrite: Option<SlugRewriteConfig>,

    /// Ordering rule within the category.
    #[serde(default)]
    pub ordering: OrderingConfig,
}

/// Prefix substitution applied to derived slugs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugRewriteConfig {
    /// Prefix to replace, e.g. "/blog".
    pub from: String,

    /// Replacement prefix, e.g. "/posts".
    pub to: String,
}

/// Sort direction for a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

/// Ordering configuration for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingConfig {
    /// Metadata field used as the sort key.
    #[serde(default = "default_sort_field")]
    pub field: String,

    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

/// Renderer registry configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Renderer identifiers registered on top of the built-in ones.
    #[serde(default)]
    pub extra: Vec<String>,
}

/// Advent calendar configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Category holding the daily entries.
    pub category: String,

    /// Calendar year.
    pub year: i32,
}

// Default value functions
fn default_content_dir() -> String {
    "content".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "mdx".to_string(), "markdown".to_string()]
}

fn default_sort_field() -> String {
    "date".to_string()
}

fn category(name: &str, directory: &str, renderer: &str) -> CategoryConfig {
    CategoryConfig {
        name: name.to_string(),
        directory: Some(directory.to_string()),
        pattern: None,
        extensions: None,
        renderer: renderer.to_string(),
        slug_rewrite: None,
        ordering: OrderingConfig::default(),
    }
}

/// Categories of the original blog layout.
pub fn default_categories() -> Vec<CategoryConfig> {
    vec![
        category("post", "blog", "blog-post"),
        category("recipe", "recipes", "recipe-post"),
        category("advent-entry", "advent-2020", "advent-entry"),
        category("book-note", "book-notes", "book-notes"),
    ]
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            extensions: default_extensions(),
            drafts: false,
        }
    }
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            field: default_sort_field(),
            direction: SortDirection::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content).map_err(|e| match e {
            CoreError::Toml(e) => CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            ),
            other => other,
        })?;
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `FOLIO__` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        if self.content.extensions.is_empty() {
            return Err(CoreError::config("content.extensions cannot be empty"));
        }

        let mut names = HashSet::new();
        for category in &self.categories {
            if category.name.is_empty() {
                return Err(CoreError::config("category name cannot be empty"));
            }
            if !names.insert(category.name.as_str()) {
                return Err(CoreError::config(format!(
                    "duplicate category '{}'",
                    category.name
                )));
            }
            match (&category.directory, &category.pattern) {
                (Some(_), None) | (None, Some(_)) => {}
                _ => {
                    return Err(CoreError::config(format!(
                        "category '{}' needs exactly one of directory or pattern",
                        category.name
                    )));
                }
            }
        }

        if let Some(calendar) = &self.calendar
            && !names.contains(calendar.category.as_str())
        {
            return Err(CoreError::config(format!(
                "calendar refers to unknown category '{}'",
                calendar.category
            )));
        }

        Ok(())
    }

    /// Extensions accepted for a category.
    pub fn extensions_for<'a>(&'a self, category: &'a CategoryConfig) -> &'a [String] {
        category
            .extensions
            .as_deref()
            .unwrap_or(&self.content.extensions)
    }
}
