//! Category definitions: membership, renderer, slug rewrite and ordering.

use std::cmp::Ordering;

use folio_core::{
    Config, ContentItem,
    config::{CategoryConfig, SortDirection},
};

use crate::{
    matcher::Matcher,
    pipeline::{PipelineError, Result},
    slug::SlugRewrite,
};

/// Sort rule for the items of one category.
///
/// Items carrying a sort key come first, grouped by key kind (dates, numbers,
/// text) and ordered by key in `direction` within a kind.
/// Items without one follow. Remaining ties are broken by ascending id, which
/// makes the order total as long as ids are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderingRule {
    /// Metadata field holding the sort key.
    pub field: String,

    /// Sort direction for keyed items.
    pub direction: SortDirection,
}

impl Default for OrderingRule {
    fn default() -> Self {
        Self {
            field: "date".to_string(),
            direction: SortDirection::Desc,
        }
    }
}

impl OrderingRule {
    /// Create a rule over `field` in `direction`.
    #[must_use]
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Compare two items of the same category.
    #[must_use]
    pub fn compare(&self, a: &ContentItem, b: &ContentItem) -> Ordering {
        let by_key = match (&a.sort_key, &b.sort_key) {
            // Kinds keep their rank in both directions.
            (Some(ka), Some(kb)) => {
                let within = match self.direction {
                    SortDirection::Asc => ka.cmp(kb),
                    SortDirection::Desc => kb.cmp(ka),
                };
                ka.kind_rank().cmp(&kb.kind_rank()).then(within)
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_key.then_with(|| a.id.cmp(&b.id))
    }
}

/// A named group of content sharing a renderer and an ordering rule.
#[derive(Debug, Clone)]
pub struct CategoryDefinition {
    /// Category tag, e.g. "post".
    pub name: String,

    /// Membership predicate over source paths.
    pub matcher: Matcher,

    /// Renderer identifier for this category's pages.
    pub renderer: String,

    /// Optional slug rewrite.
    pub slug_rewrite: Option<SlugRewrite>,

    /// Ordering rule.
    pub ordering: OrderingRule,
}

impl CategoryDefinition {
    /// Create a definition with default ordering and no rewrite.
    #[must_use]
    pub fn new(name: impl Into<String>, matcher: Matcher, renderer: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matcher,
            renderer: renderer.into(),
            slug_rewrite: None,
            ordering: OrderingRule::default(),
        }
    }

    /// Set the slug rewrite.
    #[must_use]
    pub fn with_slug_rewrite(mut self, from: &str, to: &str) -> Self {
        self.slug_rewrite = Some(SlugRewrite::new(from, to));
        self
    }

    /// Set the ordering rule.
    #[must_use]
    pub fn with_ordering(mut self, ordering: OrderingRule) -> Self {
        self.ordering = ordering;
        self
    }

    /// Build a definition from its configuration entry.
    pub fn from_config(config: &Config, category: &CategoryConfig) -> Result<Self> {
        let matcher = match (&category.directory, &category.pattern) {
            (Some(directory), None) => {
                Matcher::segment(directory.as_str(), config.extensions_for(category))
            }
            (None, Some(pattern)) => Matcher::pattern(pattern).map_err(|e| {
                PipelineError::configuration(format!(
                    "category '{}': invalid pattern: {e}",
                    category.name
                ))
            })?,
            _ => {
                return Err(PipelineError::configuration(format!(
                    "category '{}' needs exactly one of directory or pattern",
                    category.name
                )));
            }
        };

        let mut definition = Self::new(&category.name, matcher, &category.renderer)
            .with_ordering(OrderingRule::new(
                &category.ordering.field,
                category.ordering.direction,
            ));
        if let Some(rewrite) = &category.slug_rewrite {
            definition = definition.with_slug_rewrite(&rewrite.from, &rewrite.to);
        }
        Ok(definition)
    }
}
