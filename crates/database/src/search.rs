//! Substring search over the title collection

use crate::connection::KeyValueStore;
use crate::queries::titles::get_all_titles;
use yamiko_core::Title;

/// Queries shorter than this many characters return nothing
pub const MIN_QUERY_CHARS: usize = 2;

/// Returns true if the lowercased `needle` occurs in any searchable field
fn matches(title: &Title, needle: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);

    contains(&title.name)
        || title.alt_titles.iter().any(|alt| contains(alt))
        || contains(&title.author)
        || contains(&title.artist)
        || contains(&title.description)
}

/// Case-insensitive substring search over names, alternate names, author,
/// artist and description
///
/// Results keep storage order; there is no ranking.
pub fn search_titles<S: KeyValueStore + ?Sized>(store: &S, query: &str) -> Vec<Title> {
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    get_all_titles(store)
        .into_iter()
        .filter(|title| matches(title, &needle))
        .collect()
}

/// Like [`search_titles`], truncated to `limit` results
pub fn search_titles_limited<S: KeyValueStore + ?Sized>(
    store: &S,
    query: &str,
    limit: usize,
) -> Vec<Title> {
    let mut results = search_titles(store, query);
    results.truncate(limit);
    results
}
