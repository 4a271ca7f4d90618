//! Yamiko Catalog Storage
//!
//! This crate provides the manga catalog on top of a pluggable key-value
//! store: setup and demo seeding, title and chapter queries, substring
//! search, multi-predicate filtering with sort policies, and storage
//! usage reporting. Read failures degrade to empty results and are logged;
//! writes report failure to the caller.

pub mod catalog;
pub mod collection;
pub mod connection;
pub mod file_store;
pub mod filter;
pub mod info;
pub mod keys;
pub mod memory;
pub mod migrations;
pub mod queries;
pub mod search;
pub mod seed;

pub use catalog::Catalog;
pub use connection::{open, open_in_memory, KeyValueStore, StorageConfig, DEFAULT_QUOTA_BYTES};
pub use file_store::FileStore;
pub use filter::{collate, FilterOptions, SortKey};
pub use info::StorageInfo;
pub use memory::MemoryStore;
pub use migrations::{current_version, initialize, verify_integrity, InitOutcome};
pub use queries::SiteSettings;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use yamiko_core::{Chapter, Title, TitleStatus, TitleType};

    #[test]
    fn test_file_backed_workflow() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;

        {
            let store = open(StorageConfig::new(dir.path()))?;
            let (mut catalog, outcome) = Catalog::open(store, false)?;
            assert_eq!(outcome, InitOutcome::Seeded);

            let title = Title::new("Vagabond", TitleType::Manga, TitleStatus::Hiatus, 1998);
            assert!(catalog.add_title(&title));

            let mut chapter = Chapter::new(title.id.clone(), 1.0);
            chapter.pages = vec!["p1.jpg".to_string()];
            assert!(catalog.add_chapter(&chapter));
        }

        let catalog = Catalog::new(open(StorageConfig::new(dir.path()))?);
        let title = catalog.get_by_slug("vagabond").ok_or("title missing")?;
        assert_eq!(title.chapters_count, 1);
        assert_eq!(catalog.get_chapters_by_title(&title.id).len(), 1);
        verify_integrity(catalog.store())?;

        Ok(())
    }

    #[test]
    fn test_corrupt_titles_degrade_to_empty() -> Result<(), Box<dyn std::error::Error>> {
        // The warning about the unreadable collection shows up with RUST_LOG=warn
        let _ = env_logger::builder().is_test(true).try_init();
        let mut store = open_in_memory();
        initialize(&mut store)?;
        store.set(keys::MANGAS, "{broken")?;

        let catalog = Catalog::new(store);
        assert!(catalog.get_all().is_empty());
        assert!(catalog.filter(&FilterOptions::new()).is_empty());
        assert!(catalog.get_popular(10).is_empty());
        // Other collections are unaffected
        assert_eq!(catalog.get_all_chapters().len(), 40);

        Ok(())
    }
}
