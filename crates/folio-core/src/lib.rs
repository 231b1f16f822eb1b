//! Folio Core Library
//!
//! Core types, configuration, frontmatter handling and error types shared by
//! the Folio content pipeline.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;

pub use config::Config;
pub use content::{ContentItem, RawItem, SortKey};
pub use error::{CoreError, Result};
pub use frontmatter::{Frontmatter, Metadata};
