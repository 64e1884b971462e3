//! Check content without writing output

use anyhow::Result;

use crate::content::ContentLoader;
use crate::generator::{BuildReport, Generator, ResolvedPage};
use crate::Site;

/// Parse, validate and resolve everything, discarding the pages
pub fn run(site: &Site) -> Result<BuildReport> {
    let loaded = ContentLoader::new(site)?.load();
    let generator = Generator::new(site)?;

    let mut pages: Vec<ResolvedPage> = Vec::new();
    let report = generator.generate(loaded, &mut pages)?;

    report.log();
    Ok(report)
}

/// Print a human-readable report, grouped by kind of problem
pub fn print_report(report: &BuildReport) {
    if !report.skipped.is_empty() {
        println!("Skipped ({}):", report.skipped.len());
        for err in &report.skipped {
            println!("  {}", err);
        }
    }

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for w in &report.warnings {
            println!("  {}: {}", w.source, w.violation);
        }
    }

    if !report.collisions.is_empty() {
        println!("Collisions ({}):", report.collisions.len());
        for c in &report.collisions {
            println!("  {}: {} (kept), {} (dropped)", c.path, c.kept, c.dropped);
        }
    }

    println!("{}", report.summary());
}
