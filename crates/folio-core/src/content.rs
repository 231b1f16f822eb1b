//! Content types and structures.

use std::{cmp::Ordering, path::Path};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::frontmatter::{Frontmatter, Metadata, parse_date};

/// A document as returned by a content store, before the pipeline annotates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    /// Stable identifier of the source document.
    pub id: String,

    /// Path relative to the content root, `/` separated.
    pub source_path: String,

    /// Frontmatter of the document.
    #[serde(default)]
    pub metadata: Metadata,
}

impl RawItem {
    /// Create a raw item whose id is its source path.
    #[must_use]
    pub fn new(source_path: impl Into<String>, metadata: Metadata) -> Self {
        let source_path = source_path.into();
        Self {
            id: source_path.clone(),
            source_path,
            metadata,
        }
    }

    /// Build a raw item from a file path relative to the content root.
    #[must_use]
    pub fn from_relative_path(relative: &Path, frontmatter: Frontmatter) -> Self {
        let source_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        Self::new(source_path, frontmatter.into_metadata())
    }
}

/// Value used to order items within a category.
///
/// Dates sort before numbers, which sort before text, so a category mixing
/// kinds still has a total order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SortKey {
    /// A parsed date.
    Date(DateTime<Utc>),
    /// A numeric value such as a weight.
    Number(f64),
    /// Any other scalar, compared as text.
    Text(String),
}

impl SortKey {
    /// Derive a sort key from a metadata value.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(
                parse_date(s).map_or_else(|| Self::Text(s.clone()), Self::Date),
            ),
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::Bool(b) => Some(Self::Text(b.to_string())),
            _ => None,
        }
    }

    /// Rank of the key's kind: dates, then numbers, then text.
    #[must_use]
    pub fn kind_rank(&self) -> u8 {
        match self {
            Self::Date(_) => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
        }
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

/// A content item annotated with its category, slug and sort key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Stable identifier of the source document.
    pub id: String,

    /// Category tag the item was collected under.
    pub category: String,

    /// Path relative to the content root.
    pub source_path: String,

    /// Canonical URL path, unique across the site.
    pub slug: String,

    /// Value used for ordering within the category.
    #[serde(default)]
    pub sort_key: Option<SortKey>,

    /// Frontmatter passed through to the renderer.
    #[serde(default)]
    pub metadata: Metadata,
}

impl ContentItem {
    /// Title from the metadata, falling back to the slug.
    #[must_use]
    pub fn title(&self) -> &str {
        self.metadata
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or(&self.slug)
    }
}
