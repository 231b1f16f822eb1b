//! Slug derivation and rewriting.

/// Derive the canonical slug of a source path.
///
/// - `blog/hello.md` → `/blog/hello`
/// - `blog/2020/my-post/index.md` → `/blog/2020/my-post`
/// - `index.md` → `/`
pub fn derive_slug(source_path: &str) -> String {
    let path = source_path.replace('\\', "/");
    let mut segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    if let Some(file_name) = segments.pop() {
        let stem = match file_name.rfind('.') {
            Some(pos) if pos > 0 => &file_name[..pos],
            _ => file_name,
        };
        if stem != "index" {
            segments.push(stem);
        }
    }

    format!("/{}", segments.join("/"))
}

/// Normalize a URL path: leading slash, no empty segments, no trailing slash.
pub fn normalize(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Segment-aligned prefix substitution applied to derived slugs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugRewrite {
    from: String,
    to: String,
}

impl SlugRewrite {
    /// Create a rewrite replacing the `from` prefix with `to`.
    #[must_use]
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: normalize(from),
            to: normalize(to),
        }
    }

    /// Prefix being replaced.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.from
    }

    /// Replacement prefix.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.to
    }

    /// Apply the rewrite. Slugs outside the prefix are returned unchanged.
    #[must_use]
    pub fn apply(&self, slug: &str) -> String {
        if self.from == "/" {
            return normalize(&format!("{}/{slug}", self.to));
        }
        match slug.strip_prefix(self.from.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => {
                normalize(&format!("{}{rest}", self.to))
            }
            _ => slug.to_string(),
        }
    }
}
