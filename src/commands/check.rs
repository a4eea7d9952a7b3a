//! Validate every document in the site

use anyhow::Result;
use std::io::Write;

use crate::content::{Catalog, FrontMatter};
use crate::Site;

/// Problems found in a catalog
#[derive(Debug, Default)]
pub struct Report {
    pub documents: usize,
    /// `path: reason` lines for documents that failed to load
    pub malformed: Vec<String>,
    /// URL and the paths that claim it
    pub duplicate_urls: Vec<(String, Vec<String>)>,
    /// `path: reason` lines for metadata that does not survive re-serialization
    pub round_trip: Vec<String>,
}

impl Report {
    pub fn problem_count(&self) -> usize {
        self.malformed.len() + self.duplicate_urls.len() + self.round_trip.len()
    }

    pub fn is_ok(&self) -> bool {
        self.problem_count() == 0
    }
}

/// Inspect a loaded catalog
pub fn inspect(catalog: &Catalog) -> Report {
    let mut report = Report {
        documents: catalog.documents.len(),
        malformed: catalog.malformed.iter().map(|m| m.to_string()).collect(),
        duplicate_urls: catalog.duplicate_urls(),
        round_trip: Vec::new(),
    };

    for doc in &catalog.documents {
        let reparsed = doc.front_matter.to_block().and_then(|block| {
            let (fm, _) = FrontMatter::parse(&block)?;
            Ok(fm)
        });
        match reparsed {
            Ok(fm) if fm == doc.front_matter => {}
            Ok(_) => report
                .round_trip
                .push(format!("{}: metadata changed after re-serialization", doc.path)),
            Err(e) => report.round_trip.push(format!("{}: {}", doc.path, e)),
        }
    }

    report
}

/// Check the site and fail when any problem is found
pub fn run(site: &Site) -> Result<()> {
    let catalog = site.load();
    let report = inspect(&catalog);
    let stdout = std::io::stdout();
    write_report(&report, &mut stdout.lock())?;

    if !report.is_ok() {
        anyhow::bail!("{} problem(s) found", report.problem_count());
    }
    Ok(())
}

pub fn write_report<W: Write>(report: &Report, out: &mut W) -> Result<()> {
    writeln!(out, "Checked {} documents", report.documents)?;

    for line in &report.malformed {
        writeln!(out, "  malformed: {}", line)?;
    }
    for (url, paths) in &report.duplicate_urls {
        writeln!(out, "  duplicate url {}: {}", url, paths.join(", "))?;
    }
    for line in &report.round_trip {
        writeln!(out, "  round trip: {}", line)?;
    }

    if report.is_ok() {
        writeln!(out, "No problems found")?;
    }
    Ok(())
}
