//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::ContentLoader;
use crate::generator::{Generator, ResolvedPage};
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let loaded = ContentLoader::new(site)?.load();
    let generator = Generator::new(site)?;
    let pages = generator.resolve(&loaded.records);

    match content_type {
        "post" | "posts" => {
            let posts: Vec<_> = pages.iter().filter(|p| p.kind.is_post()).collect();
            println!("Posts ({}):", posts.len());
            for post in posts {
                let date = post
                    .date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "----------".to_string());
                println!("  {} - {} [{}]", date, post.title, post.source);
            }
        }
        "page" | "pages" => {
            let others: Vec<_> = pages.iter().filter(|p| !p.kind.is_post()).collect();
            println!("Pages ({}):", others.len());
            for page in others {
                println!("  {} {} [{}]", page.url, page.title, page.source);
            }
        }
        "tag" | "tags" => {
            let tags = count_terms(&pages, |p| &p.tags);
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let categories = count_terms(&pages, |p| &p.categories);
            println!("Categories ({}):", categories.len());
            for (cat, count) in categories {
                println!("  {} ({})", cat, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, page, tag, category",
                content_type
            );
        }
    }

    if !loaded.errors.is_empty() {
        println!("({} files could not be parsed; run `folio check`)", loaded.errors.len());
    }

    Ok(())
}

/// Count posts per term, most used first, ties alphabetical
fn count_terms<'a, F>(pages: &'a [ResolvedPage], terms: F) -> Vec<(&'a str, usize)>
where
    F: Fn(&'a ResolvedPage) -> &'a Vec<String>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for page in pages.iter().filter(|p| p.kind.is_post()) {
        for term in terms(page) {
            *counts.entry(term.as_str()).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    counts
}
