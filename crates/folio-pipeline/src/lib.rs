//! Folio Pipeline Library
//!
//! Turns a content store into page instructions for an external page builder.
//!
//! # Modules
//!
//! - [`store`] - Content stores (filesystem snapshot, in-memory)
//! - [`matcher`] - Category membership predicates
//! - [`category`] - Category definitions and ordering rules
//! - [`slug`] - Slug derivation and rewriting
//! - [`renderer`] - Registry of renderer identifiers
//! - [`pipeline`] - Page instruction generation and validation
//! - [`taxonomy`] - Tag groups for index pages
//! - [`calendar`] - Advent calendar grid

pub mod calendar;
pub mod category;
pub mod matcher;
pub mod pipeline;
pub mod renderer;
pub mod slug;
pub mod store;
pub mod taxonomy;

pub use calendar::{Calendar, CalendarCell};
pub use category::{CategoryDefinition, OrderingRule};
pub use matcher::Matcher;
pub use pipeline::{ContentPipeline, PageBatch, PageContext, PageInstruction, PipelineError};
pub use renderer::RendererRegistry;
pub use slug::SlugRewrite;
pub use store::{ContentStore, FsContentStore, MemoryStore, StoreError};
pub use taxonomy::{TagEntry, TagGroup, tag_groups};
