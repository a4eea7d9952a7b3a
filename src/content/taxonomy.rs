//! Category and tag index

use indexmap::IndexMap;
use serde::Serialize;

use super::Document;

/// A category or tag with the documents carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    pub name: String,
    pub slug: String,
    pub count: usize,
    /// Source paths of the documents
    pub documents: Vec<String>,
}

impl Term {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            slug: slug::slugify(name),
            count: 0,
            documents: Vec::new(),
        }
    }
}

/// Group documents by the terms `terms_of` returns for each of them.
/// Sorted by count descending, then by name.
pub fn index<'a, I, F>(documents: I, terms_of: F) -> Vec<Term>
where
    I: IntoIterator<Item = &'a Document>,
    F: Fn(&'a Document) -> &'a [String],
{
    let mut terms: IndexMap<String, Term> = IndexMap::new();

    for doc in documents {
        for name in terms_of(doc) {
            let term = terms
                .entry(name.to_lowercase())
                .or_insert_with(|| Term::new(name));
            term.count += 1;
            term.documents.push(doc.path.clone());
        }
    }

    let mut terms: Vec<Term> = terms.into_values().collect();
    terms.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn doc(path: &str, categories: &str) -> Document {
        let content = format!("---\ncategories: [{}]\n---\nBody", categories);
        Document::parse(path, &content, &SiteConfig::default()).unwrap()
    }

    #[test]
    fn test_index_counts_and_order() {
        let docs = vec![
            doc("a.md", "Java, Spring"),
            doc("b.md", "Java"),
            doc("c.md", "Tools"),
        ];
        let terms = index(&docs, |d| d.categories.as_slice());

        let names: Vec<&str> = terms.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Java", "Spring", "Tools"]);
        assert_eq!(terms[0].count, 2);
        assert_eq!(terms[0].documents, vec!["a.md", "b.md"]);
        assert_eq!(terms[1].slug, "spring");
    }

    #[test]
    fn test_index_merges_case_variants() {
        let docs = vec![doc("a.md", "Java"), doc("b.md", "java")];
        let terms = index(&docs, |d| d.categories.as_slice());
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].name, "Java");
        assert_eq!(terms[0].count, 2);
    }
}
