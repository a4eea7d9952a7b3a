//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::Layout;

/// What to do with a document that has no front-matter block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontMatterPolicy {
    /// Empty metadata, whole text is the body
    Optional,
    /// Report the document as malformed
    Required,
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // URL
    pub url: String,
    pub baseurl: String,
    /// Pattern for posts without an explicit permalink
    pub permalink: String,
    /// Pattern for simple pages without an explicit permalink
    pub page_permalink: String,

    // Reading
    /// Content root, relative to the site directory
    pub source: String,
    pub markdown_ext: Vec<String>,
    /// Glob patterns matched against source-relative paths
    pub exclude: Vec<String>,
    pub front_matter: FrontMatterPolicy,

    // Writing
    pub default_layout: Layout,
    pub excerpt_separator: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),
            author: String::new(),

            url: "http://localhost:4000".to_string(),
            baseurl: String::new(),
            permalink: "/:categories/:year/:month/:day/:title/".to_string(),
            page_permalink: "/:path/".to_string(),

            source: ".".to_string(),
            markdown_ext: vec!["md".to_string(), "markdown".to_string()],
            exclude: vec![
                "README.md".to_string(),
                "LICENSE*".to_string(),
                "vendor/**".to_string(),
                "node_modules/**".to_string(),
                "scaffolds/**".to_string(),
            ],
            front_matter: FrontMatterPolicy::Optional,

            default_layout: Layout::Post,
            excerpt_separator: "<!-- more -->".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every lookup fail
    pub fn validate(&self) -> Result<()> {
        if self.markdown_ext.is_empty() {
            anyhow::bail!("markdown_ext must list at least one extension");
        }
        for pattern in &self.exclude {
            glob::Pattern::new(pattern)
                .with_context(|| format!("Invalid exclude pattern: {}", pattern))?;
        }
        Ok(())
    }

    /// Whether `ext` (without dot) is a markdown extension
    pub fn is_markdown_ext(&self, ext: &str) -> bool {
        self.markdown_ext
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}
