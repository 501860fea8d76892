//! Bounded text summaries of catalog lists

use printify_agent_common::CatalogItem;

pub const DEFAULT_MAX_ITEMS: usize = 5;

/// Render `items` as a comma-joined title list, or as a count plus the
/// first `max_items` titles when the list is longer than that.
pub fn summarize(items: &[CatalogItem], max_items: usize) -> String {
    if items.len() > max_items {
        format!(
            "{} items available. First {}: {}",
            items.len(),
            max_items,
            join_titles(&items[..max_items])
        )
    } else {
        join_titles(items)
    }
}

/// Every title, in order, for machine-readable replies
pub fn titles(items: &[CatalogItem]) -> Vec<String> {
    items.iter().map(|item| item.title.clone()).collect()
}

fn join_titles(items: &[CatalogItem]) -> String {
    items
        .iter()
        .map(|item| item.title.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
