//! Keyword ranking of catalog items against free-text user input
//!
//! Matching is literal: an item's title is split into lower-cased words and
//! each word is looked up as a substring of the whole lower-cased query.
//! An item with at least one such word is a candidate; candidates are
//! ordered by how many of their title words were found, ties keeping the
//! catalog order.

use printify_agent_common::CatalogItem;

/// Size of the blueprint shortlist shown to users
pub const SHORTLIST_SIZE: usize = 5;

/// Rank every matching item, best first
pub fn rank(items: &[CatalogItem], query: &str) -> Vec<CatalogItem> {
    let prompt = query.trim().to_lowercase();
    if prompt.is_empty() || items.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &CatalogItem)> = items
        .iter()
        .filter_map(|item| {
            let score = match_score(&item.title, &prompt);
            (score > 0).then_some((score, item))
        })
        .collect();

    // sort_by is stable, so equal scores keep catalog order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored.into_iter().map(|(_, item)| item.clone()).collect()
}

/// `rank`, truncated to the first `limit` items
pub fn shortlist(items: &[CatalogItem], query: &str, limit: usize) -> Vec<CatalogItem> {
    let mut ranked = rank(items, query);
    ranked.truncate(limit);
    ranked
}

/// Number of title words (with repeats) found inside the lower-cased query
pub fn match_score(title: &str, lowered_query: &str) -> usize {
    title
        .to_lowercase()
        .split_whitespace()
        .filter(|word| lowered_query.contains(word))
        .count()
}
