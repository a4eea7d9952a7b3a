//! List site content

use anyhow::Result;
use std::io::Write;

use crate::content::{Catalog, Term};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let catalog = site.load();
    let stdout = std::io::stdout();
    render(&catalog, content_type, &mut stdout.lock())
}

/// Write the listing for `content_type` to `out`
pub fn render<W: Write>(catalog: &Catalog, content_type: &str, out: &mut W) -> Result<()> {
    match content_type {
        "document" | "documents" | "doc" | "docs" => {
            writeln!(out, "Documents ({}):", catalog.documents.len())?;
            for doc in &catalog.documents {
                let date = doc
                    .date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "----------".to_string());
                writeln!(
                    out,
                    "  {} {:<6} {} [{}] -> {}",
                    date, doc.layout, doc.title, doc.path, doc.url
                )?;
            }
            if !catalog.malformed.is_empty() {
                writeln!(out, "Malformed ({}):", catalog.malformed.len())?;
                for m in &catalog.malformed {
                    writeln!(out, "  {}", m)?;
                }
            }
        }
        "post" | "posts" => {
            let posts = catalog.posts();
            writeln!(out, "Posts ({}):", posts.len())?;
            for post in posts {
                let date = post
                    .date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                writeln!(out, "  {} - {} [{}]", date, post.title, post.path)?;
            }
        }
        "category" | "categories" => {
            write_terms(out, "Categories", &catalog.categories())?;
        }
        "tag" | "tags" => {
            write_terms(out, "Tags", &catalog.tags())?;
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: documents, posts, categories, tags",
                content_type
            );
        }
    }

    Ok(())
}

fn write_terms<W: Write>(out: &mut W, heading: &str, terms: &[Term]) -> Result<()> {
    writeln!(out, "{} ({}):", heading, terms.len())?;
    for term in terms {
        writeln!(out, "  {} ({})", term.name, term.count)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::Document;

    fn catalog() -> Catalog {
        let config = SiteConfig::default();
        let docs = vec![
            Document::parse(
                "_posts/2019-01-05-beans.md",
                "---\ntitle: Beans\ncategories: [Java, Spring]\n---\nBody",
                &config,
            )
            .unwrap(),
            Document::parse(
                "about.md",
                "---\nlayout: simple\ntitle: About\ncategories: Java\n---\nBody",
                &config,
            )
            .unwrap(),
        ];
        Catalog {
            documents: docs,
            malformed: Vec::new(),
        }
    }

    fn listing(content_type: &str) -> String {
        let mut out = Vec::new();
        render(&catalog(), content_type, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_list_documents() {
        let out = listing("documents");
        assert!(out.starts_with("Documents (2):"));
        assert!(out.contains("2019-01-05 post   Beans [_posts/2019-01-05-beans.md]"));
        assert!(out.contains("simple About [about.md] -> /about/"));
    }

    #[test]
    fn test_list_posts_only() {
        let out = listing("posts");
        assert!(out.starts_with("Posts (1):"));
        assert!(!out.contains("About"));
    }

    #[test]
    fn test_list_categories() {
        let out = listing("categories");
        assert!(out.contains("Categories (2):"));
        assert!(out.contains("  Java (2)"));
        assert!(out.contains("  Spring (1)"));
    }

    #[test]
    fn test_unknown_type() {
        let mut out = Vec::new();
        assert!(render(&catalog(), "widgets", &mut out).is_err());
    }
}
