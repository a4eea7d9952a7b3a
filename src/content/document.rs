//! Document model

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use super::markdown::{self, Outline};
use super::{frontmatter, DocumentError, FrontMatter};
use crate::config::{FrontMatterPolicy, SiteConfig};
use crate::helpers::{expand_permalink, normalize_path, PermalinkVars};

lazy_static! {
    /// `2019-01-05-some-title` style file stems
    static ref DATED_STEM: Regex = Regex::new(r"^(\d{4}-\d{2}-\d{2})-(.+)$").unwrap();
}

/// Page layout named in front matter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Post,
    Simple,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Post => "post",
            Layout::Simple => "simple",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(Layout::Post),
            "simple" => Ok(Layout::Simple),
            other => Err(format!("unknown layout: {} (expected post or simple)", other)),
        }
    }
}

/// A loaded content document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Source path relative to the source dir, `/`-separated
    pub path: String,

    /// Source file path; relative when built with [`Document::parse`],
    /// absolute when loaded through the content store
    pub full_source: PathBuf,

    /// Layout from front-matter or the site default
    pub layout: Layout,

    /// Title from front-matter or the file name
    pub title: String,

    pub categories: Vec<String>,

    pub tags: Vec<String>,

    /// Date from front-matter or a `YYYY-MM-DD-` file name prefix
    pub date: Option<NaiveDateTime>,

    /// URL-friendly name derived from the file name
    pub slug: String,

    /// Resolved URL path (without the site root)
    pub url: String,

    /// Metadata exactly as parsed
    pub front_matter: FrontMatter,

    /// Markup body
    pub body: String,
}

impl Document {
    /// Build a document from its raw text.
    ///
    /// `path` is the source-relative path and only feeds derived attributes;
    /// nothing is read from disk. `full_source` is left equal to `path`.
    pub fn parse(path: &str, content: &str, config: &SiteConfig) -> Result<Self, DocumentError> {
        let split = frontmatter::split(content)?;
        let front_matter = match split.block {
            Some(block) => FrontMatter::from_block(block)?,
            None if config.front_matter == FrontMatterPolicy::Required => {
                return Err(DocumentError::MissingFrontMatter)
            }
            None => FrontMatter::default(),
        };

        if split.body.trim().is_empty() {
            return Err(DocumentError::EmptyBody);
        }

        let path = path.replace('\\', "/");
        let stem = Path::new(&path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();
        let (stem_date, name) = split_dated_stem(&stem);

        let layout = front_matter.layout.unwrap_or(config.default_layout);
        let title = front_matter
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| name.to_string());

        let date = front_matter
            .date
            .as_deref()
            .and_then(parse_date_string)
            .or_else(|| stem_date.and_then(|d| d.and_hms_opt(0, 0, 0)));

        let slug = slug::slugify(name);

        let url = match front_matter.permalink.as_deref() {
            Some(permalink) if !permalink.trim().is_empty() => normalize_path(permalink),
            _ => {
                let pattern = match layout {
                    Layout::Post => &config.permalink,
                    Layout::Simple => &config.page_permalink,
                };
                expand_permalink(
                    pattern,
                    &PermalinkVars {
                        title: &slug,
                        categories: &front_matter.categories,
                        date,
                        path: &page_path(&path),
                    },
                )
            }
        };

        Ok(Self {
            full_source: PathBuf::from(&path),
            path,
            layout,
            title,
            categories: front_matter.categories.clone(),
            tags: front_matter.tags.clone(),
            date,
            slug,
            url,
            front_matter,
            body: split.body.to_string(),
        })
    }

    /// Re-serialize to source text: metadata block, blank line, body
    pub fn to_source(&self) -> Result<String, DocumentError> {
        Ok(format!("{}\n{}", self.front_matter.to_block()?, self.body))
    }

    pub fn is_post(&self) -> bool {
        self.layout == Layout::Post
    }

    /// Front-matter excerpt, or the text before `separator`, or the first paragraph
    pub fn excerpt(&self, separator: &str) -> Option<String> {
        if let Some(excerpt) = &self.front_matter.excerpt {
            return Some(excerpt.clone());
        }
        markdown::excerpt(&self.body, separator)
    }

    /// Structure of the body
    pub fn outline(&self) -> Outline {
        markdown::outline(&self.body)
    }

    /// Whether the document carries `category` (case-insensitive)
    pub fn has_category(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }
}

/// Split a `YYYY-MM-DD-name` stem into its date and name
fn split_dated_stem(stem: &str) -> (Option<NaiveDate>, &str) {
    if let Some(caps) = DATED_STEM.captures(stem) {
        if let (Some(date), Some(name)) = (caps.get(1), caps.get(2)) {
            if let Ok(d) = NaiveDate::parse_from_str(date.as_str(), "%Y-%m-%d") {
                return (Some(d), name.as_str());
            }
        }
    }
    (None, stem)
}

/// Path without extension; `index` files stand for their directory
fn page_path(path: &str) -> String {
    let without_ext = match path.rfind('.') {
        Some(dot) if !path[dot..].contains('/') => &path[..dot],
        _ => path,
    };
    if without_ext == "index" {
        String::new()
    } else if let Some(dir) = without_ext.strip_suffix("/index") {
        dir.to_string()
    } else {
        without_ext.to_string()
    }
}

/// Parse a date string in various formats
fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // Offsets are dropped, the wall-clock time is kept
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z")
        .ok()
        .map(|dt| dt.naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SiteConfig {
        SiteConfig::default()
    }

    #[test]
    fn test_parse_post_with_dated_name() {
        let content = "---\nlayout: post\ntitle: X\ncategories: [Java]\n---\n\nHello";
        let doc = Document::parse("_posts/2019-01-05-hello-java.md", content, &config()).unwrap();

        assert_eq!(doc.layout, Layout::Post);
        assert_eq!(doc.title, "X");
        assert_eq!(doc.categories, vec!["Java"]);
        assert_eq!(doc.body, "Hello");
        assert_eq!(doc.slug, "hello-java");
        assert_eq!(
            doc.date.unwrap().format("%Y-%m-%d").to_string(),
            "2019-01-05"
        );
        assert_eq!(doc.url, "/java/2019/01/05/hello-java/");
    }

    #[test]
    fn test_parse_keeps_full_source_relative() {
        let doc = Document::parse("_posts/a.md", "Body", &config()).unwrap();
        assert_eq!(doc.full_source, PathBuf::from("_posts/a.md"));
    }

    #[test]
    fn test_front_matter_date_wins() {
        let content = "---\ndate: 2020-02-03 08:15:00 +0100\n---\nBody";
        let doc = Document::parse("_posts/2019-01-05-x.md", content, &config()).unwrap();
        assert_eq!(
            doc.date.unwrap().format("%Y-%m-%d %H:%M").to_string(),
            "2020-02-03 08:15"
        );
    }

    #[test]
    fn test_simple_page_with_permalink() {
        let content = "---\nlayout: simple\ntitle: About\npermalink: about/\n---\n\nHi there.";
        let doc = Document::parse("about.md", content, &config()).unwrap();
        assert_eq!(doc.layout, Layout::Simple);
        assert_eq!(doc.url, "/about/");
        assert!(!doc.is_post());
    }

    #[test]
    fn test_simple_page_default_url() {
        let content = "---\nlayout: simple\n---\nTools list";
        let doc = Document::parse("pages/tools.md", content, &config()).unwrap();
        assert_eq!(doc.url, "/pages/tools/");

        let doc = Document::parse("docs/index.md", content, &config()).unwrap();
        assert_eq!(doc.url, "/docs/");
    }

    #[test]
    fn test_no_block_optional_policy() {
        let content = "Plain text without metadata.";
        let doc = Document::parse("notes.md", content, &config()).unwrap();
        assert!(doc.front_matter.is_empty());
        assert_eq!(doc.layout, Layout::Post);
        assert_eq!(doc.title, "notes");
        assert_eq!(doc.body, content);
    }

    #[test]
    fn test_no_block_required_policy() {
        let mut config = config();
        config.front_matter = FrontMatterPolicy::Required;
        let err = Document::parse("notes.md", "Plain text.", &config).unwrap_err();
        assert!(matches!(err, DocumentError::MissingFrontMatter));
    }

    #[test]
    fn test_empty_body_rejected() {
        let err = Document::parse("empty.md", "---\ntitle: Empty\n---\n\n   \n", &config())
            .unwrap_err();
        assert!(matches!(err, DocumentError::EmptyBody));
    }

    #[test]
    fn test_default_layout_from_config() {
        let mut config = config();
        config.default_layout = Layout::Simple;
        let doc = Document::parse("x.md", "---\ntitle: T\n---\nBody", &config).unwrap();
        assert_eq!(doc.layout, Layout::Simple);
    }

    #[test]
    fn test_to_source_round_trip() {
        let content = "---\nlayout: post\ntitle: X\ncategories: [Java]\n---\n\nHello\n";
        let doc = Document::parse("_posts/2019-01-05-x.md", content, &config()).unwrap();
        let source = doc.to_source().unwrap();
        let again = Document::parse("_posts/2019-01-05-x.md", &source, &config()).unwrap();
        assert_eq!(again, doc);
    }

    #[test]
    fn test_has_category_ignores_case() {
        let doc = Document::parse("a.md", "---\ncategories: Spring\n---\nBody", &config()).unwrap();
        assert!(doc.has_category("spring"));
        assert!(!doc.has_category("java"));
    }

    #[test]
    fn test_layout_from_str() {
        assert_eq!("simple".parse::<Layout>().unwrap(), Layout::Simple);
        assert!("page".parse::<Layout>().is_err());
    }
}
