//! Front-matter splitting, parsing and re-serialization

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::{DocumentError, Layout};

/// Marker line that opens and closes the metadata block
pub const DELIMITER: &str = "---";

/// Custom deserializer that accepts a single string or a list of strings,
/// dropping repeated entries while keeping first-seen order
fn string_set<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringSet;

    impl<'de> Visitor<'de> for StringSet {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec: Vec<String> = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                if !vec.contains(&item) {
                    vec.push(item);
                }
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringSet)
}

/// Front-matter data from a document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        deserialize_with = "string_set",
        skip_serializing_if = "Vec::is_empty",
        default
    )]
    pub categories: Vec<String>,
    #[serde(
        deserialize_with = "string_set",
        skip_serializing_if = "Vec::is_empty",
        default
    )]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Any other keys, in source order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

/// Raw text split into its metadata block and body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// Text between the delimiter lines, `None` when the document has no block
    pub block: Option<&'a str>,
    pub body: &'a str,
}

/// Split a leading `---` delimited block from the rest of the text.
///
/// The opening marker must be the very first line. A file whose first line
/// is anything else has no block and its whole text is the body.
pub fn split(content: &str) -> Result<Split<'_>, DocumentError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut lines = content.split_inclusive('\n');
    match lines.next() {
        Some(first) if is_delimiter(first) => {}
        _ => {
            return Ok(Split {
                block: None,
                body: content,
            })
        }
    }

    let block_start = content
        .find('\n')
        .map(|i| i + 1)
        .unwrap_or(content.len());
    let mut offset = block_start;

    for line in lines {
        if is_delimiter(line) {
            let block = &content[block_start..offset];
            let body = content[offset + line.len()..].trim_start_matches(['\n', '\r']);
            return Ok(Split {
                block: Some(block),
                body,
            });
        }
        offset += line.len();
    }

    Err(DocumentError::Unterminated { line: 1 })
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

impl FrontMatter {
    /// Parse front-matter from content string.
    /// Returns (front_matter, body); text without a block yields empty metadata.
    pub fn parse(content: &str) -> Result<(Self, &str), DocumentError> {
        let split = split(content)?;
        let fm = match split.block {
            Some(block) => Self::from_block(block)?,
            None => FrontMatter::default(),
        };
        Ok((fm, split.body))
    }

    /// Parse the text between the delimiters
    pub fn from_block(block: &str) -> Result<Self, DocumentError> {
        // Line 1 is the opening delimiter
        let mut has_entries = false;
        for (i, line) in block.lines().enumerate() {
            if is_skippable(line) {
                continue;
            }
            if !is_key_line(line) {
                return Err(DocumentError::InvalidKey {
                    line: i + 2,
                    text: line.trim_end().to_string(),
                });
            }
            has_entries = true;
        }

        if !has_entries {
            return Ok(FrontMatter::default());
        }

        Ok(serde_yaml::from_str::<FrontMatter>(block)?)
    }

    /// Whether no key is set
    pub fn is_empty(&self) -> bool {
        *self == FrontMatter::default()
    }

    /// Serialize back to YAML key-value lines (without delimiters)
    pub fn to_yaml(&self) -> Result<String, DocumentError> {
        if self.is_empty() {
            return Ok(String::new());
        }
        Ok(serde_yaml::to_string(self)?)
    }

    /// Serialize to a complete delimited block
    pub fn to_block(&self) -> Result<String, DocumentError> {
        Ok(format!("{DELIMITER}\n{}{DELIMITER}\n", self.to_yaml()?))
    }
}

/// Lines that carry no top-level key: blanks, comments, nested content and
/// sequence items belonging to the previous key
fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || line.starts_with([' ', '\t'])
        || trimmed == "-"
        || line.starts_with("- ")
}

/// `key:` or `key: value`, where key is a simple ASCII identifier,
/// bare or quoted (`'123':` is how YAML writes keys like `123` back out)
fn is_key_line(line: &str) -> bool {
    let line = line.trim_end();
    let Some(colon_pos) = line.find(':') else {
        return false;
    };
    let key = unquote(&line[..colon_pos]);
    let is_valid_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !is_valid_key {
        return false;
    }
    let after_colon = &line[colon_pos + 1..];
    after_colon.is_empty() || after_colon.starts_with([' ', '\t'])
}

fn unquote(key: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = key
            .strip_prefix(quote)
            .and_then(|k| k.strip_suffix(quote))
        {
            return inner;
        }
    }
    key
}
