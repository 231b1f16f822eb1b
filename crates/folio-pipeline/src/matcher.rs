//! Category membership predicates over source paths.

use std::{fmt, path::Path};

use regex::Regex;

/// Predicate selecting which source paths belong to a category.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Some directory component equals `segment` and the extension is listed.
    Segment {
        /// Directory name, e.g. "blog".
        segment: String,
        /// Lowercased extensions without the leading dot.
        extensions: Vec<String>,
    },

    /// Regular expression over the whole source path.
    Pattern(Regex),
}

impl Matcher {
    /// Create a directory-segment matcher.
    #[must_use]
    pub fn segment<S: AsRef<str>>(segment: impl Into<String>, extensions: &[S]) -> Self {
        Self::Segment {
            segment: segment.into().trim_matches('/').to_string(),
            extensions: extensions
                .iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    /// Create a regular-expression matcher.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::Pattern)
    }

    /// Check whether a `/`-separated source path belongs to the category.
    #[must_use]
    pub fn matches(&self, source_path: &str) -> bool {
        match self {
            Self::Segment {
                segment,
                extensions,
            } => {
                let path = Path::new(source_path);
                let ext_ok = path
                    .extension()
                    .map(|e| e.to_string_lossy().to_lowercase())
                    .is_some_and(|ext| extensions.iter().any(|e| *e == ext));
                if !ext_ok {
                    return false;
                }

                source_path
                    .rsplit_once('/')
                    .is_some_and(|(dirs, _)| dirs.split('/').any(|d| d == segment.as_str()))
            }
            Self::Pattern(regex) => regex.is_match(source_path),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Segment {
                segment,
                extensions,
            } => write!(f, "{segment}/**/*.{{{}}}", extensions.join(",")),
            Self::Pattern(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}
