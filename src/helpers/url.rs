//! URL and permalink helpers

use chrono::NaiveDateTime;

use crate::config::SiteConfig;

/// Values substituted into a permalink pattern
#[derive(Debug, Clone, Copy)]
pub struct PermalinkVars<'a> {
    /// Slug of the document name
    pub title: &'a str,
    pub categories: &'a [String],
    pub date: Option<NaiveDateTime>,
    /// Source path without extension
    pub path: &'a str,
}

/// Expand a permalink pattern such as `/:categories/:year/:month/:day/:title/`
///
/// # Examples
/// ```ignore
/// expand_permalink("/:category/:title/", &vars) // -> "/java/hello-world/"
/// ```
pub fn expand_permalink(pattern: &str, vars: &PermalinkVars<'_>) -> String {
    let categories = vars
        .categories
        .iter()
        .map(|c| slug::slugify(c))
        .collect::<Vec<_>>();
    let category = categories.first().cloned().unwrap_or_default();
    let date_part = |fmt: &str| {
        vars.date
            .map(|d| d.format(fmt).to_string())
            .unwrap_or_default()
    };

    let result = pattern
        .replace(":year", &date_part("%Y"))
        .replace(":month", &date_part("%m"))
        .replace(":day", &date_part("%d"))
        .replace(":i_month", &date_part("%-m"))
        .replace(":i_day", &date_part("%-d"))
        .replace(":categories", &categories.join("/"))
        .replace(":category", &category)
        .replace(":title", vars.title)
        .replace(":path", vars.path);

    normalize_path(&result)
}

/// Give a URL path a leading slash and drop empty segments.
/// A trailing slash is kept when the input had one.
///
/// # Examples
/// ```ignore
/// normalize_path("about//") // -> "/about/"
/// ```
pub fn normalize_path(path: &str) -> String {
    let path = path.trim();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return "/".to_string();
    }

    let mut result = format!("/{}", segments.join("/"));
    if path.ends_with('/') {
        result.push('/');
    }
    result
}

/// Generate a URL with the site base path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/about/") // -> "/blog/about/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.baseurl.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/about/") // -> "https://example.com/blog/about/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    let path = url_for(config, path);
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com/".to_string();
        config.baseurl = "/blog".to_string();
        config
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(y, m, d).and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/about/"), "/blog/about/");
        assert_eq!(url_for(&config, ""), "/blog/");
    }

    #[test]
    fn test_url_for_empty_baseurl() {
        let config = SiteConfig::default();
        assert_eq!(url_for(&config, "/about/"), "/about/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/about/"),
            "https://example.com/blog/about/"
        );
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("about/"), "/about/");
        assert_eq!(normalize_path("/a//b"), "/a/b");
        assert_eq!(normalize_path("/feed.xml"), "/feed.xml");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_expand_date_pattern() {
        let categories = vec!["Java".to_string(), "Spring Boot".to_string()];
        let vars = PermalinkVars {
            title: "bean-scopes",
            categories: &categories,
            date: date(2019, 3, 2),
            path: "_posts/2019-03-02-bean-scopes",
        };
        assert_eq!(
            expand_permalink("/:categories/:year/:month/:day/:title/", &vars),
            "/java/spring-boot/2019/03/02/bean-scopes/"
        );
        assert_eq!(
            expand_permalink("/:category/:i_month/:i_day/:title.html", &vars),
            "/java/3/2/bean-scopes.html"
        );
    }

    #[test]
    fn test_expand_collapses_missing_values() {
        let vars = PermalinkVars {
            title: "notes",
            categories: &[],
            date: None,
            path: "notes",
        };
        assert_eq!(
            expand_permalink("/:categories/:year/:month/:day/:title/", &vars),
            "/notes/"
        );
        assert_eq!(expand_permalink("/:path/", &vars), "/notes/");
    }
}
