//! Reference lists and site settings

use crate::collection::read_or;
use crate::connection::KeyValueStore;
use crate::keys;
use serde::{Deserialize, Serialize};
use yamiko_core::{TitleStatus, TitleType};

const GENRES: [&str; 26] = [
    "Экшен",
    "Романтика",
    "Комедия",
    "Драма",
    "Фэнтези",
    "Ужасы",
    "Спорт",
    "Повседневность",
    "Приключения",
    "Фантастика",
    "Детектив",
    "Психология",
    "Триллер",
    "Школа",
    "Сёнен",
    "Сёдзё",
    "Сэйнен",
    "Дзёсей",
    "Исекай",
    "Боевые искусства",
    "Меха",
    "Музыка",
    "Гарем",
    "Этти",
    "Трагедия",
    "Исторический",
];

/// Built-in genre list
pub fn default_genres() -> Vec<String> {
    GENRES.iter().map(|g| g.to_string()).collect()
}

/// Built-in type labels
pub fn default_types() -> Vec<String> {
    TitleType::ALL.iter().map(|t| t.label().to_string()).collect()
}

/// Built-in status labels
pub fn default_statuses() -> Vec<String> {
    TitleStatus::ALL.iter().map(|s| s.label().to_string()).collect()
}

/// Site-wide presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    pub site_name: String,
    pub site_description: String,
    pub theme: String,
    pub items_per_page: u32,
    pub allow_registration: bool,
    pub maintenance_mode: bool,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: "Yamiko".to_string(),
            site_description: "Читай мангу онлайн бесплатно".to_string(),
            theme: "dark".to_string(),
            items_per_page: 20,
            allow_registration: true,
            maintenance_mode: false,
        }
    }
}

pub fn get_genres<S: KeyValueStore + ?Sized>(store: &S) -> Vec<String> {
    read_or(store, keys::GENRES, default_genres)
}

pub fn get_types<S: KeyValueStore + ?Sized>(store: &S) -> Vec<String> {
    read_or(store, keys::TYPES, default_types)
}

pub fn get_statuses<S: KeyValueStore + ?Sized>(store: &S) -> Vec<String> {
    read_or(store, keys::STATUSES, default_statuses)
}

pub fn get_site_settings<S: KeyValueStore + ?Sized>(store: &S) -> SiteSettings {
    read_or(store, keys::SETTINGS, SiteSettings::default)
}
