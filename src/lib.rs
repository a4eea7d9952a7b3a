//! blogstore: a content store for Markdown blogs
//!
//! This crate reads a tree of Markdown documents with front-matter (blog
//! posts and simple pages), validates their metadata and gives typed read
//! access to them for an external static site generator.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;

use anyhow::Result;
use std::path::Path;

/// Configuration file looked up in the site directory
pub const CONFIG_FILE: &str = "_config.yml";

/// A site directory with its configuration
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Source (content) directory
    pub source_dir: std::path::PathBuf,
}

impl Site {
    /// Open a site directory, loading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Use an explicit configuration instead of reading `_config.yml`
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let source_dir = match config.source.trim() {
            "" | "." => base_dir.clone(),
            source => base_dir.join(source),
        };

        Self {
            config,
            base_dir,
            source_dir,
        }
    }

    /// Content store over the source directory
    pub fn store(&self) -> content::ContentStore<'_> {
        content::ContentStore::new(&self.config, &self.source_dir)
    }

    /// Load all documents
    pub fn load(&self) -> content::Catalog {
        self.store().load()
    }

    /// Absolute URL of a document
    pub fn full_url(&self, doc: &content::Document) -> String {
        helpers::full_url_for(&self.config, &doc.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_site_without_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.source_dir, dir.path());
        assert!(site.load().documents.is_empty());
    }

    #[test]
    fn test_site_with_config_and_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "url: https://blog.example.com\nbaseurl: /notes\nsource: content\n",
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("content")).unwrap();
        fs::write(
            dir.path().join("content/about.md"),
            "---\nlayout: simple\ntitle: About\npermalink: /about/\n---\n\nHello\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.source_dir, dir.path().join("content"));

        let catalog = site.load();
        let about = catalog.get("about.md").unwrap();
        assert_eq!(site.full_url(about), "https://blog.example.com/notes/about/");
    }

    #[test]
    fn test_site_with_broken_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "default_layout: gallery\n").unwrap();
        assert!(Site::new(dir.path()).is_err());
    }
}
