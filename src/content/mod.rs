//! Content module - documents, front-matter and the content store

mod document;
mod error;
pub mod frontmatter;
pub mod loader;
pub mod markdown;
pub mod taxonomy;

pub use document::{Document, Layout};
pub use error::{DocumentError, MalformedDocument};
pub use frontmatter::FrontMatter;
pub use loader::{Catalog, ContentStore};
pub use markdown::Outline;
pub use taxonomy::Term;
