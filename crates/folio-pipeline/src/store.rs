//! Content stores the pipeline queries.
//!
//! A store hands out a read-only snapshot of raw documents. The filesystem
//! store walks the content directory once when opened, so every query made
//! during a build sees the same set of files.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use folio_core::{Config, RawItem, frontmatter::parse_frontmatter};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::matcher::Matcher;

/// Content store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Frontmatter could not be parsed.
    #[error("parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Two documents share an id.
    #[error("duplicate document id: {0}")]
    DuplicateId(String),

    /// Failure reported by a custom backend.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Read-only source of raw content items.
pub trait ContentStore: Send + Sync {
    /// Return every item whose source path satisfies `matcher`.
    fn query(&self, matcher: &Matcher) -> Result<Vec<RawItem>>;
}

fn filter_items(items: &[RawItem], matcher: &Matcher) -> Vec<RawItem> {
    items
        .iter()
        .filter(|item| matcher.matches(&item.source_path))
        .cloned()
        .collect()
}

/// In-memory store over a fixed list of items.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Vec<RawItem>,
}

impl MemoryStore {
    /// Create a store over `items`.
    #[must_use]
    pub fn new(items: Vec<RawItem>) -> Self {
        Self { items }
    }

    /// Add an item.
    pub fn insert(&mut self, item: RawItem) {
        self.items.push(item);
    }
}

impl ContentStore for MemoryStore {
    fn query(&self, matcher: &Matcher) -> Result<Vec<RawItem>> {
        Ok(filter_items(&self.items, matcher))
    }
}

/// Snapshot of a content directory on disk.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
    items: Vec<RawItem>,
}

impl FsContentStore {
    /// Walk `root`, parse every content file and keep the result.
    ///
    /// Hidden files and directories are skipped, as are drafts unless
    /// `include_drafts` is set. A missing root yields an empty store.
    pub fn open<S: AsRef<str>>(
        root: impl Into<PathBuf>,
        extensions: &[S],
        include_drafts: bool,
    ) -> Result<Self> {
        let root = root.into();
        info!(dir = %root.display(), "collecting content");

        if !root.exists() {
            warn!(dir = %root.display(), "content directory does not exist");
            return Ok(Self {
                root,
                items: Vec::new(),
            });
        }

        let extensions: BTreeSet<String> = extensions
            .iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        let files = find_content_files(&root, &extensions)?;
        info!(count = files.len(), "found content files");

        let parsed: Vec<Result<Option<RawItem>>> = files
            .par_iter()
            .map(|path| parse_file(&root, path, include_drafts))
            .collect();

        let mut items = Vec::with_capacity(parsed.len());
        for result in parsed {
            if let Some(item) = result? {
                items.push(item);
            }
        }
        items.sort_by(|a, b| a.source_path.cmp(&b.source_path));

        info!(items = items.len(), "content snapshot complete");
        Ok(Self { root, items })
    }

    /// Open the content directory named in `config`, relative to `base`.
    pub fn from_config(config: &Config, base: &Path) -> Result<Self> {
        let mut extensions: BTreeSet<&str> =
            config.content.extensions.iter().map(String::as_str).collect();
        for category in &config.categories {
            if let Some(extra) = &category.extensions {
                extensions.extend(extra.iter().map(String::as_str));
            }
        }
        let extensions: Vec<&str> = extensions.into_iter().collect();
        Self::open(
            base.join(&config.content.dir),
            &extensions,
            config.content.drafts,
        )
    }

    /// Root directory of the snapshot.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All items of the snapshot, sorted by source path.
    #[must_use]
    pub fn items(&self) -> &[RawItem] {
        &self.items
    }
}

impl ContentStore for FsContentStore {
    fn query(&self, matcher: &Matcher) -> Result<Vec<RawItem>> {
        let items = filter_items(&self.items, matcher);
        debug!(%matcher, count = items.len(), "query");
        Ok(items)
    }
}

/// Find all content files below `root`, skipping hidden entries.
fn find_content_files(root: &Path, extensions: &BTreeSet<String>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if let Some(ext) = path.extension()
            && extensions.contains(&ext.to_string_lossy().to_lowercase())
        {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// Parse a single file. Returns `None` for skipped drafts.
fn parse_file(root: &Path, path: &Path, include_drafts: bool) -> Result<Option<RawItem>> {
    debug!(path = %path.display(), "parsing file");

    let content = fs::read_to_string(path)?;
    let relative = path.strip_prefix(root).unwrap_or(path);
    let (frontmatter, _body) =
        parse_frontmatter(&content, relative).map_err(|e| StoreError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if frontmatter.draft() && !include_drafts {
        debug!(path = %relative.display(), "skipping draft");
        return Ok(None);
    }

    Ok(Some(RawItem::from_relative_path(relative, frontmatter)))
}
