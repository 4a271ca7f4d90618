//! Yamiko core: domain types, slugs and the shared error taxonomy.

pub mod error;
pub mod slug;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, ErrorSeverity, RecoveryAction, Result};
pub use slug::generate_slug;
pub use types::{
    Chapter, ChapterId, ReaderBackground, ReaderFit, ReaderMode, Timestamp, Title, TitleId,
    TitleStatus, TitleType, Validator,
};
