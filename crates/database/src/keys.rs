//! Storage keys

pub const MANGAS: &str = "mangas";
pub const CHAPTERS: &str = "chapters";
pub const USERS: &str = "users";
pub const BOOKMARKS: &str = "bookmarks";
pub const READING_HISTORY: &str = "reading_history";
pub const COMMENTS: &str = "comments";
pub const RATINGS: &str = "ratings";
pub const GENRES: &str = "genres";
pub const TYPES: &str = "types";
pub const STATUSES: &str = "statuses";
pub const SETTINGS: &str = "settings";

/// Set to `"true"` once the demo seed has been written
pub const INITIALIZED: &str = "yamiko_db_initialized";
/// Schema version of the stored layout
pub const VERSION: &str = "yamiko_db_version";

/// Collections seeded as empty arrays and otherwise untouched by the catalog
pub const AUXILIARY_COLLECTIONS: [&str; 5] = [USERS, BOOKMARKS, READING_HISTORY, COMMENTS, RATINGS];

/// Every key holding a JSON array
pub const ARRAY_KEYS: [&str; 10] = [
    MANGAS,
    CHAPTERS,
    USERS,
    BOOKMARKS,
    READING_HISTORY,
    COMMENTS,
    RATINGS,
    GENRES,
    TYPES,
    STATUSES,
];
