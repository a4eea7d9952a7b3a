//! Helper functions shared by the content model and the commands

mod url;

pub use url::*;
