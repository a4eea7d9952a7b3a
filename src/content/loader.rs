//! Content store - enumerates and loads documents from the source directory

use indexmap::IndexMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::taxonomy::{self, Term};
use super::{Document, Layout, MalformedDocument};
use crate::config::SiteConfig;

/// Read access to the documents under a source directory
pub struct ContentStore<'a> {
    config: &'a SiteConfig,
    source_dir: PathBuf,
    exclude: Vec<glob::Pattern>,
}

impl<'a> ContentStore<'a> {
    /// Create a new content store
    pub fn new<P: Into<PathBuf>>(config: &'a SiteConfig, source_dir: P) -> Self {
        let exclude = config
            .exclude
            .iter()
            .filter_map(|p| match glob::Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!("Ignoring invalid exclude pattern {:?}: {}", p, e);
                    None
                }
            })
            .collect();

        Self {
            config,
            source_dir: source_dir.into(),
            exclude,
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Enumerate documents in file name order.
    ///
    /// Every call walks the directory afresh. Files that fail to load are
    /// yielded as `Err` and the walk continues.
    pub fn documents(&self) -> impl Iterator<Item = Result<Document, MalformedDocument>> + '_ {
        WalkDir::new(&self.source_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_skipped_entry(e))
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if entry.file_type().is_file() && self.is_candidate(path) {
                        Some(self.load_document(path))
                    } else {
                        None
                    }
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map(|p| self.relative_path(p))
                        .filter(|p| !p.is_empty())
                        .unwrap_or_else(|| self.source_dir.display().to_string());
                    Some(Err(MalformedDocument::new(path, io::Error::from(e).into())))
                }
            })
    }

    /// Load every document, collecting failures as diagnostics
    pub fn load(&self) -> Catalog {
        let mut catalog = Catalog::default();

        for result in self.documents() {
            match result {
                Ok(doc) => catalog.documents.push(doc),
                Err(e) => {
                    tracing::warn!("Skipping malformed document {}", e);
                    catalog.malformed.push(e);
                }
            }
        }

        tracing::debug!(
            "Loaded {} documents from {:?} ({} malformed)",
            catalog.documents.len(),
            self.source_dir,
            catalog.malformed.len()
        );

        catalog
    }

    /// Load a single document; relative paths are resolved against the source dir
    pub fn load_document(&self, path: &Path) -> Result<Document, MalformedDocument> {
        let full_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.source_dir.join(path)
        };
        let relative = self.relative_path(&full_path);

        let content = fs::read_to_string(&full_path)
            .map_err(|e| MalformedDocument::new(&relative, e.into()))?;

        let mut doc = Document::parse(&relative, &content, self.config)
            .map_err(|e| MalformedDocument::new(&relative, e))?;
        doc.full_source = full_path;

        tracing::debug!("Loaded {} ({}) -> {}", doc.path, doc.layout, doc.url);
        Ok(doc)
    }

    /// Markdown file that no exclude pattern matches
    fn is_candidate(&self, path: &Path) -> bool {
        let is_markdown = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| self.config.is_markdown_ext(e))
            .unwrap_or(false);
        if !is_markdown {
            return false;
        }

        let relative = self.relative_path(path);
        !self.exclude.iter().any(|p| p.matches(&relative))
    }

    /// `/`-separated path relative to the source dir
    fn relative_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.source_dir)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Hidden entries and generated output below the root
fn is_skipped_entry(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.') || name.starts_with("_site"))
        .unwrap_or(false)
}

/// Loaded documents plus the ones that could not be loaded
#[derive(Debug, Default)]
pub struct Catalog {
    /// Documents in enumeration order
    pub documents: Vec<Document>,
    pub malformed: Vec<MalformedDocument>,
}

impl Catalog {
    /// Look up by source-relative path
    pub fn get(&self, path: &str) -> Option<&Document> {
        let path = path.trim_start_matches("./");
        self.documents.iter().find(|d| d.path == path)
    }

    /// Look up by resolved URL; trailing slashes are ignored
    pub fn by_url(&self, url: &str) -> Option<&Document> {
        let url = url.trim_end_matches('/');
        self.documents
            .iter()
            .find(|d| d.url.trim_end_matches('/') == url)
    }

    pub fn by_layout(&self, layout: Layout) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(move |d| d.layout == layout)
    }

    /// Posts, newest first; undated posts go last
    pub fn posts(&self) -> Vec<&Document> {
        let mut posts: Vec<&Document> = self.by_layout(Layout::Post).collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts
    }

    pub fn in_category<'c>(&'c self, category: &'c str) -> impl Iterator<Item = &'c Document> {
        self.documents
            .iter()
            .filter(move |d| d.has_category(category))
    }

    pub fn categories(&self) -> Vec<Term> {
        taxonomy::index(&self.documents, |d| d.categories.as_slice())
    }

    pub fn tags(&self) -> Vec<Term> {
        taxonomy::index(&self.documents, |d| d.tags.as_slice())
    }

    /// URLs claimed by more than one document, with the claiming paths
    pub fn duplicate_urls(&self) -> Vec<(String, Vec<String>)> {
        let mut by_url: IndexMap<&str, Vec<String>> = IndexMap::new();
        for doc in &self.documents {
            by_url.entry(doc.url.as_str()).or_default().push(doc.path.clone());
        }
        by_url
            .into_iter()
            .filter(|(_, paths)| paths.len() > 1)
            .map(|(url, paths)| (url.to_string(), paths))
            .collect()
    }

    /// No malformed documents and no URL collisions
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty() && self.duplicate_urls().is_empty()
    }
}
