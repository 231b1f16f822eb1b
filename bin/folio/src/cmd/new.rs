//! New command - create a content file for a category

use std::{
    fs,
    path::{Component, Path},
};

use chrono::Utc;
use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use folio_core::{Config, config::CategoryConfig};
use folio_pipeline::renderer::BOOK_NOTES;

use super::site_root;

/// Run the new command.
///
/// Creates `<content>/<directory>/<name>.<ext>` for a directory-based
/// category, with draft frontmatter.
pub fn run(config_path: &Path, category: &str, name: &str) -> Result<()> {
    tracing::info!(?config_path, category, name, "Creating new content");

    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    let definition = config
        .categories
        .iter()
        .find(|c| c.name == category)
        .ok_or_else(|| eyre!("Unknown category '{category}'"))?;
    let Some(directory) = &definition.directory else {
        bail!("Category '{category}' is pattern based; create the file by hand");
    };

    let name = name.trim_matches('/');
    if name.is_empty() {
        bail!("Content name cannot be empty");
    }
    if !Path::new(name)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        bail!("Content name '{name}' must stay inside the category directory");
    }

    let ext = config
        .extensions_for(definition)
        .first()
        .map_or("md", String::as_str);
    let file_path = site_root(config_path)
        .join(&config.content.dir)
        .join(directory)
        .join(format!("{name}.{ext}"));

    if file_path.exists() {
        bail!("{} already exists", file_path.display());
    }

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).wrap_err("Failed to create directories")?;
    }

    fs::write(&file_path, generate_frontmatter(definition, name))
        .wrap_err("Failed to write file")?;

    tracing::info!(?file_path, "Created new content file");
    println!("Created: {}", file_path.display());

    Ok(())
}

fn generate_frontmatter(category: &CategoryConfig, name: &str) -> String {
    let title = Path::new(name)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled")
        .replace('-', " ");

    let date = Utc::now().format("%Y-%m-%d").to_string();

    // Book notes credit the book's author.
    let extra = if category.renderer == BOOK_NOTES {
        "authorName: \"\"\n"
    } else {
        ""
    };

    format!(
        r#"---
title: "{title}"
date: {date}
draft: true
tags: []
{extra}---

Write your content here.
"#
    )
}

#[cfg(test)]
mod tests {
    use folio_core::frontmatter::parse_frontmatter;
    use tempfile::TempDir;

    use super::*;

    fn site(config: &str) -> TempDir {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("folio.toml"), config).expect("write");
        dir
    }

    const BASE: &str = "[site]\ntitle = \"Test\"\nbase_url = \"https://example.com\"\n";

    #[test]
    fn test_new_post() {
        let dir = site(BASE);
        run(&dir.path().join("folio.toml"), "post", "hello-world").expect("new");

        let path = dir.path().join("content/blog/hello-world.md");
        let content = fs::read_to_string(&path).expect("read");
        let (frontmatter, body) = parse_frontmatter(&content, &path).expect("parse");
        assert_eq!(frontmatter.title(), Some("hello world"));
        assert!(frontmatter.draft());
        assert!(frontmatter.date("date").is_some());
        assert!(body.contains("Write your content here."));
    }

    #[test]
    fn test_new_book_note_has_author() {
        let dir = site(BASE);
        run(&dir.path().join("folio.toml"), "book-note", "dune").expect("new");

        let path = dir.path().join("content/book-notes/dune.md");
        let content = fs::read_to_string(&path).expect("read");
        let (frontmatter, _) = parse_frontmatter(&content, &path).expect("parse");
        assert!(frontmatter.metadata().contains_key("authorName"));
    }

    #[test]
    fn test_new_refuses_to_overwrite() {
        let dir = site(BASE);
        let config = dir.path().join("folio.toml");
        run(&config, "recipe", "pancakes").expect("new");
        assert!(run(&config, "recipe", "pancakes").is_err());
    }

    #[test]
    fn test_new_rejects_parent_dir_names() {
        let dir = site(BASE);
        let config = dir.path().join("folio.toml");

        for name in ["../../x", "drafts/../../x", "./x"] {
            let err = run(&config, "post", name).unwrap_err();
            assert!(err.to_string().contains("must stay inside"));
        }
        assert!(!dir.path().join("x.md").exists());
        assert!(!dir.path().join("content/x.md").exists());

        run(&config, "post", "2020/nested").expect("nested name");
        assert!(dir.path().join("content/blog/2020/nested.md").exists());
    }

    #[test]
    fn test_new_rejects_unknown_and_pattern_categories() {
        let dir = site(&format!(
            "{BASE}\n[[categories]]\nname = \"talk\"\npattern = \"^talks/\"\nrenderer = \"blog-post\"\n"
        ));
        let config = dir.path().join("folio.toml");

        let err = run(&config, "post", "x").unwrap_err();
        assert!(err.to_string().contains("Unknown category"));

        let err = run(&config, "talk", "x").unwrap_err();
        assert!(err.to_string().contains("pattern based"));
    }
}
