//! The content-collection-to-page pipeline.
//!
//! For every category the pipeline queries the content store, annotates the
//! raw items with slug and sort key, orders them, links each item to its
//! neighbours and emits one [`PageInstruction`] per item. All categories are
//! aggregated and checked for slug collisions before anything is returned.

use std::collections::{BTreeMap, HashMap, HashSet};

use folio_core::{Config, ContentItem, RawItem, SortKey};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    category::CategoryDefinition,
    renderer::RendererRegistry,
    slug::derive_slug,
    store::{ContentStore, StoreError},
};

/// Pipeline errors. All of them abort the build.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The content store failed to answer a category query.
    #[error("content query for category '{category}' failed: {source}")]
    ContentQuery {
        category: String,
        #[source]
        source: StoreError,
    },

    /// Two items resolve to the same route.
    #[error("slug collision on '{slug}' between '{first}' and '{second}'")]
    SlugCollision {
        slug: String,
        first: String,
        second: String,
    },

    /// Invalid category definitions, detected before any query runs.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl PipelineError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Navigation context handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContext {
    /// The item this page renders.
    pub item: ContentItem,

    /// The item after this one in category order (older, for newest-first).
    pub previous: Option<ContentItem>,

    /// The item before this one in category order (newer, for newest-first).
    pub next: Option<ContentItem>,
}

/// One unit of work for the page builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInstruction {
    /// Final URL path, equal to the item's slug.
    pub route: String,

    /// Renderer identifier of the item's category.
    pub renderer: String,

    /// Category the item was built under.
    pub category: String,

    /// Item and neighbours.
    pub context: PageContext,
}

/// A validated set of page instructions.
///
/// Pages are stored sorted by route; `sequences` keeps the routes of each
/// category in category order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageBatch {
    pages: Vec<PageInstruction>,
    sequences: BTreeMap<String, Vec<String>>,
}

impl PageBatch {
    /// All instructions, sorted by route.
    #[must_use]
    pub fn pages(&self) -> &[PageInstruction] {
        &self.pages
    }

    /// Number of instructions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Look up an instruction by route.
    #[must_use]
    pub fn get(&self, route: &str) -> Option<&PageInstruction> {
        self.pages
            .binary_search_by(|p| p.route.as_str().cmp(route))
            .ok()
            .map(|i| &self.pages[i])
    }

    /// Instructions of a category in category order.
    pub fn sequence(&self, category: &str) -> impl Iterator<Item = &PageInstruction> {
        self.sequences
            .get(category)
            .into_iter()
            .flatten()
            .filter_map(|route| self.get(route))
    }

    /// Category names present in the batch.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.sequences.keys().map(String::as_str)
    }

    /// Pretty JSON rendering of the batch.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Builds page instructions from a content store and category definitions.
#[derive(Debug, Clone)]
pub struct ContentPipeline {
    categories: Vec<CategoryDefinition>,
}

impl ContentPipeline {
    /// Validate `categories` against `renderers` and create the pipeline.
    pub fn new(categories: Vec<CategoryDefinition>, renderers: &RendererRegistry) -> Result<Self> {
        let mut names = HashSet::new();
        for category in &categories {
            if category.name.is_empty() {
                return Err(PipelineError::configuration("category name cannot be empty"));
            }
            if !names.insert(category.name.as_str()) {
                return Err(PipelineError::configuration(format!(
                    "duplicate category '{}'",
                    category.name
                )));
            }
            if !renderers.contains(&category.renderer) {
                return Err(PipelineError::configuration(format!(
                    "category '{}' uses unknown renderer '{}'",
                    category.name, category.renderer
                )));
            }
            if category.ordering.field.is_empty() {
                return Err(PipelineError::configuration(format!(
                    "category '{}' has an empty ordering field",
                    category.name
                )));
            }
        }

        Ok(Self { categories })
    }

    /// Create a pipeline from site configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let renderers =
            RendererRegistry::new().with_renderers(config.renderers.extra.iter().cloned());
        let categories = config
            .categories
            .iter()
            .map(|c| CategoryDefinition::from_config(config, c))
            .collect::<Result<Vec<_>>>()?;
        Self::new(categories, &renderers)
    }

    /// Category definitions in configuration order.
    #[must_use]
    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    /// Look up a category by name.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Compute the slug of `item` under `category`.
    #[must_use]
    pub fn resolve_slug(item: &RawItem, category: &CategoryDefinition) -> String {
        let slug = derive_slug(&item.source_path);
        match &category.slug_rewrite {
            Some(rewrite) => rewrite.apply(&slug),
            None => slug,
        }
    }

    /// Annotate a raw item with category, slug and sort key.
    #[must_use]
    pub fn annotate(item: RawItem, category: &CategoryDefinition) -> ContentItem {
        let slug = Self::resolve_slug(&item, category);
        let sort_key = item
            .metadata
            .get(&category.ordering.field)
            .and_then(SortKey::from_value);
        ContentItem {
            id: item.id,
            category: category.name.clone(),
            source_path: item.source_path,
            slug,
            sort_key,
            metadata: item.metadata,
        }
    }

    /// Order the items of one category and link neighbours.
    ///
    /// Instructions come back in category order. For item `i` of `n`,
    /// `previous` is item `i + 1` and `next` is item `i - 1`.
    #[must_use]
    pub fn build_category(
        items: Vec<RawItem>,
        category: &CategoryDefinition,
    ) -> Vec<PageInstruction> {
        let mut items: Vec<ContentItem> = items
            .into_iter()
            .map(|item| Self::annotate(item, category))
            .collect();
        items.sort_by(|a, b| category.ordering.compare(a, b));

        let n = items.len();
        (0..n)
            .map(|i| {
                let previous = (i + 1 < n).then(|| items[i + 1].clone());
                let next = (i > 0).then(|| items[i - 1].clone());
                let item = items[i].clone();
                PageInstruction {
                    route: item.slug.clone(),
                    renderer: category.renderer.clone(),
                    category: category.name.clone(),
                    context: PageContext {
                        item,
                        previous,
                        next,
                    },
                }
            })
            .collect()
    }

    /// Query every category, build its pages and validate the whole batch.
    ///
    /// Either every instruction is returned or none is.
    pub fn build_all<S: ContentStore + ?Sized>(&self, store: &S) -> Result<PageBatch> {
        info!(categories = self.categories.len(), "building page instructions");

        let built: Vec<Result<Vec<PageInstruction>>> = self
            .categories
            .par_iter()
            .map(|category| {
                let items = store
                    .query(&category.matcher)
                    .and_then(|items| check_unique_ids(&items).map(|()| items))
                    .map_err(|source| PipelineError::ContentQuery {
                        category: category.name.clone(),
                        source,
                    })?;
                debug!(category = %category.name, count = items.len(), "category queried");
                Ok(Self::build_category(items, category))
            })
            .collect();

        let mut per_category = Vec::with_capacity(built.len());
        for result in built {
            per_category.push(result?);
        }

        let mut seen: HashMap<String, String> = HashMap::new();
        for instruction in per_category.iter().flatten() {
            let id = &instruction.context.item.id;
            if let Some(first) = seen.get(&instruction.route) {
                return Err(PipelineError::SlugCollision {
                    slug: instruction.route.clone(),
                    first: first.clone(),
                    second: id.clone(),
                });
            }
            seen.insert(instruction.route.clone(), id.clone());
        }

        let mut sequences = BTreeMap::new();
        let mut pages = Vec::with_capacity(seen.len());
        for (category, instructions) in self.categories.iter().zip(per_category) {
            let routes = instructions.iter().map(|p| p.route.clone()).collect();
            sequences.insert(category.name.clone(), routes);
            pages.extend(instructions);
        }
        pages.sort_by(|a, b| a.route.cmp(&b.route));

        info!(pages = pages.len(), "page instructions complete");
        Ok(PageBatch { pages, sequences })
    }
}

fn check_unique_ids(items: &[RawItem]) -> std::result::Result<(), StoreError> {
    let mut ids = HashSet::new();
    for item in items {
        if !ids.insert(item.id.as_str()) {
            return Err(StoreError::DuplicateId(item.id.clone()));
        }
    }
    Ok(())
}
