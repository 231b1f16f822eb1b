//! Build command - plans every page and writes the manifest

use std::{collections::BTreeMap, fs, path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;
use folio_pipeline::{
    Calendar, ContentPipeline, FsContentStore, PageBatch, PageInstruction, TagGroup, tag_groups,
};
use serde::Serialize;

use super::site_root;

/// File name of the manifest inside the output directory.
pub const MANIFEST_FILE: &str = "pages.json";

/// Everything the page builder needs, written as `pages.json`.
#[derive(Debug, Serialize)]
pub struct Manifest<'a> {
    /// Page instructions sorted by route.
    pub pages: &'a [PageInstruction],

    /// Tag groups per category.
    pub tags: BTreeMap<String, Vec<TagGroup>>,

    /// Advent calendar, when one is configured.
    pub calendar: Option<Calendar>,
}

impl<'a> Manifest<'a> {
    /// Assemble the manifest of a validated batch.
    pub fn new(config: &Config, batch: &'a PageBatch) -> Self {
        let tags = batch
            .categories()
            .map(|category| (category.to_string(), tag_groups(batch, category)))
            .collect();

        let calendar = config
            .calendar
            .as_ref()
            .and_then(|c| Calendar::december(c.year, batch, &c.category));

        Self {
            pages: batch.pages(),
            tags,
            calendar,
        }
    }
}

/// Load configuration, snapshot the content directory and run the pipeline.
pub fn plan(config_path: &Path, drafts: bool) -> Result<(Config, PageBatch)> {
    let mut config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    if drafts {
        config.content.drafts = true;
    }
    tracing::debug!(?config, "Loaded configuration");

    let store = FsContentStore::from_config(&config, site_root(config_path))
        .wrap_err("Failed to read content")?;
    let pipeline = ContentPipeline::from_config(&config).wrap_err("Invalid categories")?;
    let batch = pipeline.build_all(&store).wrap_err("Build failed")?;

    Ok((config, batch))
}

/// Run the build command.
///
/// Writes `pages.json` to `output`. Nothing is written when the build fails.
pub fn run(config_path: &Path, output: &Path, drafts: bool) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, drafts, "Starting build");

    let (config, batch) = plan(config_path, drafts)?;
    let manifest = Manifest::new(&config, &batch);
    let json = serde_json::to_string_pretty(&manifest).wrap_err("Failed to encode manifest")?;

    fs::create_dir_all(output).wrap_err("Failed to create output directory")?;
    let manifest_path = output.join(MANIFEST_FILE);
    fs::write(&manifest_path, json).wrap_err("Failed to write manifest")?;

    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    for category in batch.categories() {
        println!("  {category:<14}{}", batch.sequence(category).count());
    }
    println!("  {:<14}{}", "tags", manifest.tags.values().map(Vec::len).sum::<usize>());
    println!();
    println!("  Pages:      {}", batch.len());
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {}", manifest_path.display());
    println!();

    tracing::info!(pages = batch.len(), ?duration, "Build completed successfully");

    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, content).expect("write");
    }

    fn site() -> TempDir {
        let dir = TempDir::new().expect("tempdir");
        write(
            dir.path(),
            "folio.toml",
            r#"
[site]
title = "Test"
base_url = "https://example.com"

[calendar]
category = "advent-entry"
year = 2020
"#,
        );
        write(
            dir.path(),
            "content/blog/a.md",
            "---\ntitle: A\ndate: 2020-01-02\ntags: [rust]\n---\n",
        );
        write(
            dir.path(),
            "content/blog/b.md",
            "---\ntitle: B\ndate: 2020-01-01\ndraft: true\n---\n",
        );
        write(
            dir.path(),
            "content/advent-2020/1.mdx",
            "---\ntitle: Day 1\ndate: 2020-12-01\n---\n",
        );
        dir
    }

    #[test]
    fn test_run_writes_manifest() {
        let dir = site();
        let output = dir.path().join("public");
        run(&dir.path().join("folio.toml"), &output, false).expect("build");

        let json = fs::read_to_string(output.join(MANIFEST_FILE)).expect("manifest");
        let manifest: serde_json::Value = serde_json::from_str(&json).expect("json");

        let routes: Vec<_> = manifest["pages"]
            .as_array()
            .expect("pages")
            .iter()
            .filter_map(|p| p["route"].as_str())
            .collect();
        assert_eq!(routes, vec!["/advent-2020/1", "/blog/a"]);
        assert_eq!(manifest["tags"]["post"][0]["tag"], "rust");
        assert_eq!(manifest["calendar"]["year"], 2020);
    }

    #[test]
    fn test_plan_with_drafts() {
        let dir = site();
        let (config, batch) = plan(&dir.path().join("folio.toml"), true).expect("plan");
        assert!(config.content.drafts);
        assert!(batch.get("/blog/b").is_some());
    }

    #[test]
    fn test_missing_config_fails_without_output() {
        let dir = TempDir::new().expect("tempdir");
        let output = dir.path().join("public");
        assert!(run(&dir.path().join("folio.toml"), &output, false).is_err());
        assert!(!output.exists());
    }
}
