//! Configuration module

mod site;

pub use site::FrontMatterPolicy;
pub use site::SiteConfig;
