//! Chapter queries
//!
//! Chapters of a title are ordered by number. Adjacency is computed on
//! every read and never stored.

use crate::collection::{read_list, read_list_for_update, try_write_json};
use crate::connection::KeyValueStore;
use crate::keys;
use crate::queries::titles::{get_title_by_id, update_title};
use yamiko_core::{Chapter, ChapterId, TitleId, Validator};

/// Gets every chapter in storage order
pub fn get_all_chapters<S: KeyValueStore + ?Sized>(store: &S) -> Vec<Chapter> {
    read_list(store, keys::CHAPTERS)
}

/// Gets a chapter by ID
pub fn get_chapter_by_id<S: KeyValueStore + ?Sized>(store: &S, id: &ChapterId) -> Option<Chapter> {
    get_all_chapters(store).into_iter().find(|c| &c.id == id)
}

/// Gets the chapters of a title, ascending by number
///
/// Chapters with equal numbers keep their storage order.
pub fn get_chapters_by_title<S: KeyValueStore + ?Sized>(store: &S, title_id: &TitleId) -> Vec<Chapter> {
    let mut chapters: Vec<Chapter> = get_all_chapters(store)
        .into_iter()
        .filter(|c| &c.title_id == title_id)
        .collect();
    chapters.sort_by(|a, b| a.number.total_cmp(&b.number));
    chapters
}

/// Gets the chapter with the smallest number greater than `current`
pub fn get_next_chapter<S: KeyValueStore + ?Sized>(
    store: &S,
    title_id: &TitleId,
    current: f64,
) -> Option<Chapter> {
    get_chapters_by_title(store, title_id)
        .into_iter()
        .find(|c| c.number > current)
}

/// Gets the chapter with the largest number less than `current`
pub fn get_prev_chapter<S: KeyValueStore + ?Sized>(
    store: &S,
    title_id: &TitleId,
    current: f64,
) -> Option<Chapter> {
    get_chapters_by_title(store, title_id)
        .into_iter()
        .rev()
        .find(|c| c.number < current)
}

pub fn get_first_chapter<S: KeyValueStore + ?Sized>(store: &S, title_id: &TitleId) -> Option<Chapter> {
    get_chapters_by_title(store, title_id).into_iter().next()
}

pub fn get_last_chapter<S: KeyValueStore + ?Sized>(store: &S, title_id: &TitleId) -> Option<Chapter> {
    get_chapters_by_title(store, title_id).into_iter().next_back()
}

/// Appends a chapter and bumps its title's chapter count
///
/// The owning title is not required to exist. Returns false, after
/// logging, if the chapter is invalid, its ID is taken or a write fails.
/// The two writes are independent: if the title update fails the chapter
/// stays stored.
pub fn add_chapter<S: KeyValueStore + ?Sized>(store: &mut S, chapter: &Chapter) -> bool {
    if let Err(errors) = chapter.validate() {
        log::warn!("Rejected chapter {}: {}", chapter.number, errors.join("; "));
        return false;
    }

    let Some(mut chapters) = read_list_for_update::<Chapter, _>(store, keys::CHAPTERS) else {
        return false;
    };
    if chapters.iter().any(|c| c.id == chapter.id) {
        log::warn!("Chapter {} already exists", chapter.id);
        return false;
    }

    chapters.push(chapter.clone());
    if !try_write_json(store, keys::CHAPTERS, &chapters) {
        return false;
    }

    match get_title_by_id(store, &chapter.title_id) {
        Some(mut title) => {
            title.chapters_count += 1;
            title.touch();
            update_title(store, &title)
        }
        None => {
            log::debug!("Chapter {} added for unknown title {}", chapter.id, chapter.title_id);
            true
        }
    }
}
