//! Registry of renderer identifiers known to the page builder.
//!
//! The pipeline never calls into rendering; it only checks that every category
//! names a renderer the page builder will be able to resolve.

use std::collections::BTreeSet;

/// Renderer for blog posts.
pub const BLOG_POST: &str = "blog-post";
/// Renderer for recipes.
pub const RECIPE_POST: &str = "recipe-post";
/// Renderer for advent calendar entries.
pub const ADVENT_ENTRY: &str = "advent-entry";
/// Renderer for book notes.
pub const BOOK_NOTES: &str = "book-notes";

/// Registry of renderer identifiers.
#[derive(Debug, Clone, Default)]
pub struct RendererRegistry {
    renderers: BTreeSet<String>,
}

impl RendererRegistry {
    /// Create a new registry with the built-in renderers.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    /// Register built-in renderers.
    fn register_defaults(&mut self) {
        for name in [BLOG_POST, RECIPE_POST, ADVENT_ENTRY, BOOK_NOTES] {
            self.register(name);
        }
    }

    /// Register a renderer identifier.
    pub fn register(&mut self, name: impl Into<String>) {
        self.renderers.insert(name.into());
    }

    /// Register identifiers in bulk, builder style.
    #[must_use]
    pub fn with_renderers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.register(name);
        }
        self
    }

    /// Check if a renderer is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.renderers.contains(name)
    }

    /// Iterate over registered identifiers in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.renderers.iter().map(String::as_str)
    }
}
