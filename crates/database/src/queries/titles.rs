//! Title queries

use crate::collection::{read_list, read_list_for_update, try_write_json};
use crate::connection::KeyValueStore;
use crate::filter::{self, FilterOptions, SortKey};
use crate::keys;
use yamiko_core::{Title, TitleId, Validator};

/// Default length of the convenience listings
pub const DEFAULT_LISTING_LIMIT: usize = 10;

/// Gets every title in storage order
pub fn get_all_titles<S: KeyValueStore + ?Sized>(store: &S) -> Vec<Title> {
    read_list(store, keys::MANGAS)
}

/// Gets a title by ID
pub fn get_title_by_id<S: KeyValueStore + ?Sized>(store: &S, id: &TitleId) -> Option<Title> {
    get_all_titles(store).into_iter().find(|t| &t.id == id)
}

/// Gets the first title with the given slug
pub fn get_title_by_slug<S: KeyValueStore + ?Sized>(store: &S, slug: &str) -> Option<Title> {
    get_all_titles(store).into_iter().find(|t| t.slug == slug)
}

/// Filters and sorts every title
pub fn filter_titles<S: KeyValueStore + ?Sized>(store: &S, options: &FilterOptions) -> Vec<Title> {
    filter::apply(get_all_titles(store), options)
}

fn listing<S: KeyValueStore + ?Sized>(store: &S, options: &FilterOptions, limit: usize) -> Vec<Title> {
    let mut titles = filter_titles(store, options);
    titles.truncate(limit);
    titles
}

/// Most viewed titles
pub fn get_popular_titles<S: KeyValueStore + ?Sized>(store: &S, limit: usize) -> Vec<Title> {
    listing(store, &FilterOptions::new().sorted_by(SortKey::Popular), limit)
}

/// Most recently updated titles
pub fn get_recently_updated_titles<S: KeyValueStore + ?Sized>(store: &S, limit: usize) -> Vec<Title> {
    listing(store, &FilterOptions::new().sorted_by(SortKey::Updated), limit)
}

/// Best rated titles, ignoring those rated below 1
pub fn get_top_rated_titles<S: KeyValueStore + ?Sized>(store: &S, limit: usize) -> Vec<Title> {
    let options = FilterOptions::new()
        .with_min_rating(1.0)
        .sorted_by(SortKey::Rating);
    listing(store, &options, limit)
}

/// Appends a title to the collection
///
/// Returns false, after logging, if the title is invalid, its ID is taken
/// or the write fails.
pub fn add_title<S: KeyValueStore + ?Sized>(store: &mut S, title: &Title) -> bool {
    if let Err(errors) = title.validate() {
        log::warn!("Rejected title '{}': {}", title.name, errors.join("; "));
        return false;
    }

    let Some(mut titles) = read_list_for_update::<Title, _>(store, keys::MANGAS) else {
        return false;
    };
    if titles.iter().any(|t| t.id == title.id) {
        log::warn!("Title {} already exists", title.id);
        return false;
    }

    titles.push(title.clone());
    try_write_json(store, keys::MANGAS, &titles)
}

/// Replaces the stored title with the same ID
pub fn update_title<S: KeyValueStore + ?Sized>(store: &mut S, title: &Title) -> bool {
    let Some(mut titles) = read_list_for_update::<Title, _>(store, keys::MANGAS) else {
        return false;
    };
    let Some(slot) = titles.iter_mut().find(|t| t.id == title.id) else {
        log::warn!("Cannot update missing title {}", title.id);
        return false;
    };

    *slot = title.clone();
    try_write_json(store, keys::MANGAS, &titles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::migrations::initialize;
    use yamiko_core::{TitleStatus, TitleType};

    fn seeded() -> MemoryStore {
        let mut store = MemoryStore::new();
        initialize(&mut store).unwrap();
        store
    }

    #[test]
    fn test_empty_store_has_no_titles() {
        let store = MemoryStore::new();
        assert!(get_all_titles(&store).is_empty());
        assert!(get_title_by_slug(&store, "one-piece").is_none());
    }

    #[test]
    fn test_lookup_by_id_and_slug() {
        let store = seeded();
        let one_piece = get_title_by_slug(&store, "one-piece").unwrap();
        assert_eq!(one_piece.name, "Ван Пис");

        let same = get_title_by_id(&store, &one_piece.id).unwrap();
        assert_eq!(same, one_piece);
        assert!(get_title_by_id(&store, &TitleId::new()).is_none());
    }

    #[test]
    fn test_slug_lookup_returns_first_match() {
        let mut store = MemoryStore::new();
        let first = Title::new("Berserk", TitleType::Manga, TitleStatus::Ongoing, 1989);
        let second = Title::new("Berserk", TitleType::Manga, TitleStatus::Completed, 1990);
        assert!(add_title(&mut store, &first));
        assert!(add_title(&mut store, &second));

        assert_eq!(get_title_by_slug(&store, "berserk").unwrap().id, first.id);
    }

    #[test]
    fn test_popular() {
        let store = seeded();
        let popular = get_popular_titles(&store, 3);

        let slugs: Vec<_> = popular.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, vec!["one-piece", "attack-on-titan", "solo-leveling"]);
    }

    #[test]
    fn test_top_rated_skips_unrated() {
        let mut store = seeded();
        let unrated = Title::new("Новинка", TitleType::Manga, TitleStatus::Announced, 2025);
        assert!(add_title(&mut store, &unrated));

        let top = get_top_rated_titles(&store, 100);
        assert_eq!(top.len(), 8);
        assert_eq!(top[0].slug, "one-piece");
        assert!(top.windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[test]
    fn test_recently_updated() {
        let mut store = seeded();
        let mut fresh = Title::new("Fresh", TitleType::Oel, TitleStatus::Ongoing, 2025);
        fresh.updated_at = yamiko_core::Timestamp::from_millis(4_102_444_800_000);
        assert!(add_title(&mut store, &fresh));

        let recent = get_recently_updated_titles(&store, DEFAULT_LISTING_LIMIT);
        assert_eq!(recent[0].id, fresh.id);
        assert_eq!(recent.len(), 9);
    }

    #[test]
    fn test_add_title_rejects_duplicates_and_invalid() {
        let mut store = MemoryStore::new();
        let title = Title::new("Vinland Saga", TitleType::Manga, TitleStatus::Ongoing, 2005);
        assert!(add_title(&mut store, &title));
        assert!(!add_title(&mut store, &title));

        let blank = Title::new(" ", TitleType::Manga, TitleStatus::Ongoing, 2005);
        assert!(!add_title(&mut store, &blank));
        assert_eq!(get_all_titles(&store).len(), 1);
    }

    #[test]
    fn test_add_title_reports_quota() {
        let mut store = MemoryStore::with_quota(16);
        let title = Title::new("Vinland Saga", TitleType::Manga, TitleStatus::Ongoing, 2005);
        assert!(!add_title(&mut store, &title));
        assert!(get_all_titles(&store).is_empty());
    }

    #[test]
    fn test_add_title_keeps_unreadable_catalog() {
        let mut store = MemoryStore::new();
        store.set(keys::MANGAS, "[{\"id\": 1}]").unwrap();

        let title = Title::new("Vinland Saga", TitleType::Manga, TitleStatus::Ongoing, 2005);
        assert!(!add_title(&mut store, &title));
        assert_eq!(store.get(keys::MANGAS).unwrap().as_deref(), Some("[{\"id\": 1}]"));
    }

    #[test]
    fn test_update_title() {
        let mut store = seeded();
        let mut title = get_title_by_slug(&store, "tower-of-god").unwrap();
        title.views += 1;
        assert!(update_title(&mut store, &title));
        assert_eq!(get_title_by_id(&store, &title.id).unwrap().views, 21301);

        let stranger = Title::new("Nobody", TitleType::Manga, TitleStatus::Ongoing, 2000);
        assert!(!update_title(&mut store, &stranger));
    }
}
