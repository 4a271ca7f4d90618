//! Catalog query operations organized by entity

pub mod chapters;
pub mod reference;
pub mod titles;

pub use chapters::{
    add_chapter, get_all_chapters, get_chapter_by_id, get_chapters_by_title, get_first_chapter,
    get_last_chapter, get_next_chapter, get_prev_chapter,
};
pub use reference::{get_genres, get_site_settings, get_statuses, get_types, SiteSettings};
pub use titles::{
    add_title, filter_titles, get_all_titles, get_popular_titles, get_recently_updated_titles,
    get_title_by_id, get_title_by_slug, get_top_rated_titles, update_title, DEFAULT_LISTING_LIMIT,
};
