//! Show one document

use anyhow::Result;
use std::io::Write;
use std::path::Path;

use crate::content::Document;
use crate::Site;

/// Print metadata and outline of the document at `path` (relative to the source dir)
pub fn run(site: &Site, path: &str, json: bool) -> Result<()> {
    let doc = site.store().load_document(Path::new(path))?;
    let stdout = std::io::stdout();
    render(site, &doc, json, &mut stdout.lock())
}

pub fn render<W: Write>(site: &Site, doc: &Document, json: bool, out: &mut W) -> Result<()> {
    let excerpt = doc.excerpt(&site.config.excerpt_separator);
    let outline = doc.outline();

    if json {
        let value = serde_json::json!({
            "document": doc,
            "full_url": site.full_url(doc),
            "excerpt": excerpt,
            "outline": outline,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }

    let list_or_dash = |items: &[String]| {
        if items.is_empty() {
            "-".to_string()
        } else {
            items.join(", ")
        }
    };

    writeln!(out, "Title:      {}", doc.title)?;
    writeln!(out, "Path:       {}", doc.path)?;
    writeln!(out, "Layout:     {}", doc.layout)?;
    if let Some(date) = doc.date {
        writeln!(out, "Date:       {}", date.format("%Y-%m-%d %H:%M"))?;
    }
    writeln!(out, "Categories: {}", list_or_dash(&doc.categories))?;
    writeln!(out, "Tags:       {}", list_or_dash(&doc.tags))?;
    writeln!(out, "URL:        {}", site.full_url(doc))?;
    if let Some(excerpt) = excerpt {
        writeln!(out, "Excerpt:    {}", excerpt)?;
    }

    writeln!(out, "Outline:")?;
    for heading in &outline.headings {
        let indent = "  ".repeat(heading.level as usize);
        writeln!(
            out,
            "{}{} {}",
            indent,
            "#".repeat(heading.level as usize),
            heading.text
        )?;
    }
    let languages: Vec<&str> = outline
        .code_blocks
        .iter()
        .map(|c| c.language.as_deref().unwrap_or("text"))
        .collect();
    writeln!(
        out,
        "  Code blocks: {}{}",
        languages.len(),
        if languages.is_empty() {
            String::new()
        } else {
            format!(" ({})", languages.join(", "))
        }
    )?;
    writeln!(out, "  Tables: {}", outline.tables)?;
    writeln!(
        out,
        "  Links: {} ({} external)",
        outline.links.len(),
        outline.external_links().count()
    )?;
    writeln!(out, "  Words: {}", outline.words)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    const POST: &str = r#"---
layout: post
title: Spring Profiles
categories: [Java, Spring]
---

Profiles switch beans per environment.

## Activating

```java
@Profile("dev")
```

[Reference](https://docs.spring.io/spring-boot/reference/features/profiles.html)
"#;

    fn site() -> Site {
        let mut config = SiteConfig::default();
        config.url = "https://blog.example.com".to_string();
        Site::with_config("/tmp/site", config)
    }

    fn doc() -> Document {
        Document::parse("_posts/2020-04-01-profiles.md", POST, &site().config).unwrap()
    }

    #[test]
    fn test_show_text() {
        let mut out = Vec::new();
        render(&site(), &doc(), false, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Title:      Spring Profiles"));
        assert!(out.contains("Categories: Java, Spring"));
        assert!(out.contains("Tags:       -"));
        assert!(out.contains(
            "URL:        https://blog.example.com/java/spring/2020/04/01/profiles/"
        ));
        assert!(out.contains("Excerpt:    Profiles switch beans per environment."));
        assert!(out.contains("    ## Activating"));
        assert!(out.contains("  Code blocks: 1 (java)"));
        assert!(out.contains("  Links: 1 (1 external)"));
    }

    #[test]
    fn test_show_json() {
        let mut out = Vec::new();
        render(&site(), &doc(), true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["document"]["title"], "Spring Profiles");
        assert_eq!(value["document"]["layout"], "post");
        assert_eq!(value["outline"]["code_blocks"][0]["language"], "java");
        assert_eq!(
            value["full_url"],
            "https://blog.example.com/java/spring/2020/04/01/profiles/"
        );
    }
}
