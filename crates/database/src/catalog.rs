//! Catalog facade over an injected key-value store
//!
//! Every query re-reads persisted state; nothing is cached.

use crate::connection::KeyValueStore;
use crate::filter::FilterOptions;
use crate::info::{storage_info, StorageInfo};
use crate::migrations::{self, InitOutcome};
use crate::queries::{self, SiteSettings};
use crate::search;
use yamiko_core::{AppError, Chapter, ChapterId, Title, TitleId};

/// Read and write access to the title and chapter collections
#[derive(Debug, Clone)]
pub struct Catalog<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Catalog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Wraps `store` and seeds it if this is the first run
    pub fn open(mut store: S, with_demo_data: bool) -> Result<(Self, InitOutcome), AppError> {
        let outcome = migrations::initialize_with(&mut store, with_demo_data)?;
        Ok((Self::new(store), outcome))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn initialize(&mut self) -> Result<InitOutcome, AppError> {
        migrations::initialize(&mut self.store)
    }

    // Titles

    pub fn get_all(&self) -> Vec<Title> {
        queries::get_all_titles(&self.store)
    }

    pub fn get_by_id(&self, id: &TitleId) -> Option<Title> {
        queries::get_title_by_id(&self.store, id)
    }

    pub fn get_by_slug(&self, slug: &str) -> Option<Title> {
        queries::get_title_by_slug(&self.store, slug)
    }

    pub fn search(&self, query: &str) -> Vec<Title> {
        search::search_titles(&self.store, query)
    }

    pub fn search_limited(&self, query: &str, limit: usize) -> Vec<Title> {
        search::search_titles_limited(&self.store, query, limit)
    }

    pub fn filter(&self, options: &FilterOptions) -> Vec<Title> {
        queries::filter_titles(&self.store, options)
    }

    pub fn get_popular(&self, limit: usize) -> Vec<Title> {
        queries::get_popular_titles(&self.store, limit)
    }

    pub fn get_recently_updated(&self, limit: usize) -> Vec<Title> {
        queries::get_recently_updated_titles(&self.store, limit)
    }

    pub fn get_top_rated(&self, limit: usize) -> Vec<Title> {
        queries::get_top_rated_titles(&self.store, limit)
    }

    pub fn add_title(&mut self, title: &Title) -> bool {
        queries::add_title(&mut self.store, title)
    }

    pub fn update_title(&mut self, title: &Title) -> bool {
        queries::update_title(&mut self.store, title)
    }

    // Chapters

    pub fn get_all_chapters(&self) -> Vec<Chapter> {
        queries::get_all_chapters(&self.store)
    }

    pub fn get_chapter_by_id(&self, id: &ChapterId) -> Option<Chapter> {
        queries::get_chapter_by_id(&self.store, id)
    }

    pub fn get_chapters_by_title(&self, title_id: &TitleId) -> Vec<Chapter> {
        queries::get_chapters_by_title(&self.store, title_id)
    }

    pub fn get_next_chapter(&self, title_id: &TitleId, current: f64) -> Option<Chapter> {
        queries::get_next_chapter(&self.store, title_id, current)
    }

    pub fn get_prev_chapter(&self, title_id: &TitleId, current: f64) -> Option<Chapter> {
        queries::get_prev_chapter(&self.store, title_id, current)
    }

    pub fn get_first_chapter(&self, title_id: &TitleId) -> Option<Chapter> {
        queries::get_first_chapter(&self.store, title_id)
    }

    pub fn get_last_chapter(&self, title_id: &TitleId) -> Option<Chapter> {
        queries::get_last_chapter(&self.store, title_id)
    }

    pub fn add_chapter(&mut self, chapter: &Chapter) -> bool {
        queries::add_chapter(&mut self.store, chapter)
    }

    // Reference data

    pub fn genres(&self) -> Vec<String> {
        queries::get_genres(&self.store)
    }

    pub fn types(&self) -> Vec<String> {
        queries::get_types(&self.store)
    }

    pub fn statuses(&self) -> Vec<String> {
        queries::get_statuses(&self.store)
    }

    pub fn site_settings(&self) -> SiteSettings {
        queries::get_site_settings(&self.store)
    }

    pub fn storage_info(&self) -> Result<StorageInfo, AppError> {
        storage_info(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[test]
    fn test_open_seeds_once() {
        let (catalog, outcome) = Catalog::open(MemoryStore::new(), true).unwrap();
        assert_eq!(outcome, InitOutcome::Seeded);
        assert_eq!(catalog.get_all().len(), 8);

        let (catalog, outcome) = Catalog::open(catalog.into_inner(), true).unwrap();
        assert_eq!(outcome, InitOutcome::AlreadyInitialized);
        assert_eq!(catalog.get_all().len(), 8);
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new(MemoryStore::new());
        assert!(catalog.get_all().is_empty());
        assert!(catalog.get_all_chapters().is_empty());
        assert!(catalog.search("piece").is_empty());
        assert_eq!(catalog.types().len(), 5);
    }

    #[test]
    fn test_chapter_navigation_through_facade() {
        let (catalog, _) = Catalog::open(MemoryStore::new(), true).unwrap();
        let title = catalog.get_by_slug("chainsaw-man").unwrap();

        let first = catalog.get_first_chapter(&title.id).unwrap();
        let second = catalog.get_next_chapter(&title.id, first.number).unwrap();
        assert_eq!(second.number, 2.0);
        assert_eq!(catalog.get_prev_chapter(&title.id, second.number), Some(first));
        assert_eq!(catalog.get_last_chapter(&title.id).unwrap().number, 5.0);
    }

    #[test]
    fn test_search_limited_for_dropdown() {
        let (catalog, _) = Catalog::open(MemoryStore::new(), true).unwrap();
        assert!(catalog.search_limited("ом", 5).len() <= 5);
        assert_eq!(catalog.search_limited("ом", 1).len(), 1);
    }

    #[test]
    fn test_storage_info_counts_seed() {
        let (catalog, _) = Catalog::open(MemoryStore::with_quota(1024 * 1024), true).unwrap();
        let info = catalog.storage_info().unwrap();
        assert!(info.used_bytes > 0);
        assert!(info.percent_used < 100.0);
    }
}
