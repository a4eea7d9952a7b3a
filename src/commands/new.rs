//! Create a new post or simple page

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::content::{Document, FrontMatter, Layout};
use crate::Site;

/// Directory that holds posts, relative to the source dir
pub const POSTS_DIR: &str = "_posts";

const DEFAULT_BODY: &str = "Write your content here.\n";

/// Create a new document dated today
pub fn run(site: &Site, title: &str, layout: Layout, categories: &[String]) -> Result<PathBuf> {
    let today = chrono::Local::now().date_naive();
    create_document(site, title, layout, categories, today)
}

/// Write a scaffold document and return its path.
///
/// Posts go to `_posts/YYYY-MM-DD-<slug>.md`, simple pages to `<slug>.md`.
/// A `scaffolds/<layout>.md` file in the site dir replaces the default
/// template; `{{ title }}` and `{{ date }}` are substituted in it.
pub fn create_document(
    site: &Site,
    title: &str,
    layout: Layout,
    categories: &[String],
    date: NaiveDate,
) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a usable file name", title);
    }

    let (target_dir, filename) = match layout {
        Layout::Post => (
            site.source_dir.join(POSTS_DIR),
            format!("{}-{}.md", date.format("%Y-%m-%d"), slug),
        ),
        Layout::Simple => (site.source_dir.clone(), format!("{}.md", slug)),
    };
    let file_path = target_dir.join(&filename);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let scaffold_path = site
        .base_dir
        .join("scaffolds")
        .join(format!("{}.md", layout));
    let content = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
            .replace("{{ title }}", title)
            .replace("{{ date }}", &date.format("%Y-%m-%d").to_string())
    } else {
        let front_matter = FrontMatter {
            layout: Some(layout),
            title: Some(title.to_string()),
            categories: categories.to_vec(),
            ..Default::default()
        };
        format!("{}\n{}", front_matter.to_block()?, DEFAULT_BODY)
    };

    // Never write something the store would reject
    let relative = file_path
        .strip_prefix(&site.source_dir)
        .unwrap_or(&file_path)
        .to_string_lossy()
        .to_string();
    Document::parse(&relative, &content, &site.config)
        .with_context(|| format!("Scaffold for {} produces an invalid document", layout))?;

    fs::create_dir_all(&target_dir)?;
    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
