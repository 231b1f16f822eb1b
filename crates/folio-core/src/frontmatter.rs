//! Frontmatter parsing for content files.
//!
//! Frontmatter is kept as an untyped [`Metadata`] map so that every field the
//! author wrote reaches the renderer unchanged. The few fields the pipeline
//! itself cares about (title, date, tags, draft) are read through accessors on
//! [`Frontmatter`].

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::{CoreError, Result};

/// Untyped frontmatter mapping, passed through to renderers verbatim.
pub type Metadata = serde_json::Map<String, Value>;

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Parsed frontmatter of a single document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    metadata: Metadata,
}

impl Frontmatter {
    /// Wrap an existing metadata map.
    #[must_use]
    pub fn from_metadata(metadata: Metadata) -> Self {
        Self { metadata }
    }

    /// Borrow the raw metadata.
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Consume into the raw metadata.
    #[must_use]
    pub fn into_metadata(self) -> Metadata {
        self.metadata
    }

    /// Page title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").and_then(Value::as_str)
    }

    /// Whether the document is a draft. Accepts `true` and `"true"`.
    #[must_use]
    pub fn draft(&self) -> bool {
        match self.metadata.get("draft") {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// Publication date read from `field`.
    #[must_use]
    pub fn date(&self, field: &str) -> Option<DateTime<Utc>> {
        self.metadata
            .get(field)
            .and_then(Value::as_str)
            .and_then(parse_date)
    }

    /// Tags of the document.
    ///
    /// A missing or null tag list means the document has no tags. A single
    /// string is treated as one tag.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        tags_of(&self.metadata)
    }
}

/// Read the tag list out of a metadata map.
pub fn tags_of(metadata: &Metadata) -> Vec<String> {
    match metadata.get("tags") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect(),
        Some(Value::String(tag)) if !tag.is_empty() => vec![tag.clone()],
        _ => Vec::new(),
    }
}

/// Parse a frontmatter date.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS`
/// and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Split content into frontmatter and body.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();

    let after_first = &content[delimiter.len()..];
    let closing_pos = after_first.find(delimiter)?;

    let frontmatter = after_first[..closing_pos].trim();
    let body = after_first[closing_pos + delimiter.len()..].trim_start();

    Some((format, frontmatter, body))
}

/// Parse frontmatter from a string.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(Frontmatter, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        // No frontmatter found, return default with full content
        return Ok((Frontmatter::default(), content.to_string()));
    };

    let value = match format {
        FrontmatterFormat::Yaml => serde_yaml::from_str::<Value>(fm_str)
            .map_err(|e| CoreError::frontmatter(path, e.to_string()))?,
        FrontmatterFormat::Toml => {
            let table: toml::Table =
                toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;
            toml_to_json(toml::Value::Table(table))
        }
    };

    let metadata = match value {
        Value::Object(map) => map,
        Value::Null => Metadata::new(),
        _ => return Err(CoreError::frontmatter(path, "frontmatter must be a mapping")),
    };

    Ok((Frontmatter::from_metadata(metadata), body.to_string()))
}

/// Convert a TOML value to JSON, rendering datetimes as strings.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
