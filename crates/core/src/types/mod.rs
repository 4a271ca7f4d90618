//! Domain types for Yamiko
//!
//! This module contains all domain models organized by responsibility:
//! - `title`: Title and Chapter types with their identifiers and enums
//! - `reader`: Reader display preferences
//! - `common`: Shared traits and utilities

mod common;
mod reader;
mod title;

// Re-export all public types
pub use common::{Timestamp, Validator};
pub use reader::{ReaderBackground, ReaderFit, ReaderMode};
pub use title::{Chapter, ChapterId, Title, TitleId, TitleStatus, TitleType};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chapter_links_to_title() {
        let title_id = TitleId::new();
        let chapter = Chapter::new(title_id.clone(), 1.0);
        assert_eq!(chapter.title_id, title_id);
        assert_ne!(chapter.id, ChapterId::new());
        assert_eq!(ReaderMode::default(), ReaderMode::Vertical);
    }

    #[test]
    fn test_ids_roundtrip_through_strings() {
        let id = TitleId::new();
        assert_eq!(TitleId::from_string(id.to_string()), id);
        assert_eq!(ChapterId::from("lq3x9k2abc").as_str(), "lq3x9k2abc");
    }
}
