//! Markdown body inspection

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;

/// A heading found in the body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    /// Anchor id derived from the text
    pub id: String,
}

/// A fenced or indented code block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// Fence language tag, if any
    pub language: Option<String>,
    pub lines: usize,
}

/// Structure of a markup body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outline {
    pub headings: Vec<Heading>,
    pub code_blocks: Vec<CodeBlock>,
    pub tables: usize,
    /// Link destinations in order of appearance
    pub links: Vec<String>,
    /// Words of prose, code excluded
    pub words: usize,
}

impl Outline {
    /// Links that leave the site
    pub fn external_links(&self) -> impl Iterator<Item = &str> {
        self.links
            .iter()
            .map(String::as_str)
            .filter(|l| l.starts_with("http://") || l.starts_with("https://"))
    }
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Walk the body once and collect its outline
pub fn outline(markdown: &str) -> Outline {
    let mut outline = Outline::default();

    let mut heading: Option<(u8, String)> = None;
    let mut code: Option<(Option<String>, String)> = None;

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                heading = Some((level as u8, String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = heading.take() {
                    let text = text.trim().to_string();
                    outline.headings.push(Heading {
                        level,
                        id: slug::slugify(&text),
                        text,
                    });
                }
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(|lang| lang.to_string()),
                    CodeBlockKind::Indented => None,
                };
                code = Some((language, String::new()));
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((language, content)) = code.take() {
                    outline.code_blocks.push(CodeBlock {
                        language,
                        lines: content.lines().count(),
                    });
                }
            }
            Event::Start(Tag::Table(_)) => outline.tables += 1,
            Event::Start(Tag::Link { dest_url, .. }) => {
                outline.links.push(dest_url.to_string());
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, content)) = code.as_mut() {
                    content.push_str(&text);
                    continue;
                }
                if let Some((_, heading_text)) = heading.as_mut() {
                    heading_text.push_str(&text);
                }
                outline.words += text.split_whitespace().count();
            }
            _ => {}
        }
    }

    outline
}

/// Text before `separator` when present, else the first paragraph as plain text
pub fn excerpt(markdown: &str, separator: &str) -> Option<String> {
    if !separator.is_empty() {
        if let Some(pos) = markdown.find(separator) {
            let excerpt = markdown[..pos].trim();
            return (!excerpt.is_empty()).then(|| excerpt.to_string());
        }
    }

    let mut in_paragraph = false;
    let mut text = String::new();
    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::Paragraph) => in_paragraph = true,
            Event::End(TagEnd::Paragraph) if in_paragraph => break,
            Event::Text(t) | Event::Code(t) if in_paragraph => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
            _ => {}
        }
    }

    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
