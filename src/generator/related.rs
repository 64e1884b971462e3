//! Related-post selection

use std::cmp::Reverse;
use std::collections::HashSet;

use super::ResolvedPage;

/// Indices of the posts most related to `posts[index]`.
///
/// Posts are ranked by the number of shared tags, then by date (newest
/// first). Posts sharing no tag are never related.
pub fn related_posts(posts: &[ResolvedPage], index: usize, limit: usize) -> Vec<usize> {
    let Some(current) = posts.get(index) else {
        return Vec::new();
    };
    if limit == 0 || current.tags.is_empty() {
        return Vec::new();
    }

    let tags: HashSet<&str> = current.tags.iter().map(String::as_str).collect();

    let mut scored: Vec<(usize, usize)> = posts
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .filter_map(|(i, post)| {
            let shared = post
                .tags
                .iter()
                .filter(|t| tags.contains(t.as_str()))
                .count();
            (shared > 0).then_some((i, shared))
        })
        .collect();

    scored.sort_by_key(|&(i, shared)| (Reverse(shared), Reverse(posts[i].date), i));
    scored.into_iter().take(limit).map(|(i, _)| i).collect()
}
