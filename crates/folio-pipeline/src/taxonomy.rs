//! Tag groups for index pages.

use std::collections::{BTreeMap, BTreeSet};

use folio_core::frontmatter::tags_of;
use serde::{Deserialize, Serialize};

use crate::pipeline::PageBatch;

/// A page reference inside a tag group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    /// Route of the tagged page.
    pub route: String,

    /// Title of the tagged page.
    pub title: String,
}

/// All pages of a category carrying one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagGroup {
    /// The tag.
    pub tag: String,

    /// Tagged pages in category order.
    pub entries: Vec<TagEntry>,
}

/// Group the pages of `category` by tag.
///
/// Groups are sorted by tag; pages without tags belong to no group.
pub fn tag_groups(batch: &PageBatch, category: &str) -> Vec<TagGroup> {
    let mut groups: BTreeMap<String, Vec<TagEntry>> = BTreeMap::new();

    for page in batch.sequence(category) {
        let item = &page.context.item;
        let tags: BTreeSet<String> = tags_of(&item.metadata).into_iter().collect();
        for tag in tags {
            groups.entry(tag).or_default().push(TagEntry {
                route: page.route.clone(),
                title: item.title().to_string(),
            });
        }
    }

    groups
        .into_iter()
        .map(|(tag, entries)| TagGroup { tag, entries })
        .collect()
}

#[cfg(test)]
mod tests {
    use folio_core::{Metadata, RawItem};
    use serde_json::json;

    use super::*;
    use crate::{
        category::CategoryDefinition, matcher::Matcher, pipeline::ContentPipeline,
        renderer::RendererRegistry, store::MemoryStore,
    };

    fn post(path: &str, date: &str, tags: Option<serde_json::Value>) -> RawItem {
        let mut metadata = Metadata::new();
        metadata.insert("title".to_string(), json!(path));
        metadata.insert("date".to_string(), json!(date));
        if let Some(tags) = tags {
            metadata.insert("tags".to_string(), tags);
        }
        RawItem::new(path, metadata)
    }

    fn batch(items: Vec<RawItem>) -> PageBatch {
        let category =
            CategoryDefinition::new("post", Matcher::segment("blog", &["md"]), "blog-post");
        ContentPipeline::new(vec![category], &RendererRegistry::new())
            .expect("pipeline")
            .build_all(&MemoryStore::new(items))
            .expect("build")
    }

    #[test]
    fn test_tag_groups_sorted_and_in_category_order() {
        let batch = batch(vec![
            post("blog/old.md", "2020-01-01", Some(json!(["react", "javascript"]))),
            post("blog/new.md", "2020-02-01", Some(json!(["javascript"]))),
            post("blog/mid.md", "2020-01-15", Some(json!(["clojure"]))),
        ]);

        let groups = tag_groups(&batch, "post");
        let tags: Vec<_> = groups.iter().map(|g| g.tag.as_str()).collect();
        assert_eq!(tags, vec!["clojure", "javascript", "react"]);

        let javascript: Vec<_> = groups[1].entries.iter().map(|e| e.route.as_str()).collect();
        assert_eq!(javascript, vec!["/blog/new", "/blog/old"]);
        assert_eq!(groups[1].entries[0].title, "blog/new.md");
    }

    #[test]
    fn test_untagged_posts_belong_to_no_group() {
        let batch = batch(vec![
            post("blog/a.md", "2020-01-01", None),
            post("blog/b.md", "2020-01-02", Some(json!(null))),
            post("blog/c.md", "2020-01-03", Some(json!([]))),
        ]);
        assert!(tag_groups(&batch, "post").is_empty());
    }

    #[test]
    fn test_duplicate_tags_counted_once() {
        let batch = batch(vec![post("blog/a.md", "2020-01-01", Some(json!(["rust", "rust"])))]);
        let groups = tag_groups(&batch, "post");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].entries.len(), 1);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let batch = batch(vec![post("blog/a.md", "2020-01-01", Some(json!(["rust"])))]);
        assert!(tag_groups(&batch, "recipe").is_empty());
    }
}
