//! Title (manga) and chapter domain models

use crate::slug::generate_slug;
use crate::types::{Timestamp, Validator};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a title
///
/// Any non-empty string is accepted when reading stored data; older
/// catalogs carry short base36 ids rather than UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TitleId(String);

impl TitleId {
    /// Creates a new random TitleId
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing identifier
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TitleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TitleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a chapter
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterId(String);

impl ChapterId {
    /// Creates a new random ChapterId
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing identifier
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ChapterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChapterId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Publication format of a title
///
/// Stored under the labels the catalog has always used on disk; the English
/// names are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TitleType {
    #[serde(rename = "Манга", alias = "manga")]
    Manga,
    #[serde(rename = "Манхва", alias = "manhwa")]
    Manhwa,
    #[serde(rename = "Маньхуа", alias = "manhua")]
    Manhua,
    #[serde(rename = "OEL", alias = "oel")]
    Oel,
    #[serde(rename = "Руманга", alias = "rumanga")]
    Rumanga,
}

impl TitleType {
    /// Every type, in catalog display order
    pub const ALL: [TitleType; 5] = [
        Self::Manga,
        Self::Manhwa,
        Self::Manhua,
        Self::Oel,
        Self::Rumanga,
    ];

    /// Returns the stored display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Manga => "Манга",
            Self::Manhwa => "Манхва",
            Self::Manhua => "Маньхуа",
            Self::Oel => "OEL",
            Self::Rumanga => "Руманга",
        }
    }

    fn ascii_name(&self) -> &'static str {
        match self {
            Self::Manga => "manga",
            Self::Manhwa => "manhwa",
            Self::Manhua => "manhua",
            Self::Oel => "oel",
            Self::Rumanga => "rumanga",
        }
    }
}

impl fmt::Display for TitleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TitleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.ascii_name() == needle || t.label().to_lowercase() == needle)
            .ok_or_else(|| format!("unknown title type '{}'", s))
    }
}

/// Publication status of a title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TitleStatus {
    #[serde(rename = "Онгоинг", alias = "ongoing")]
    Ongoing,
    #[serde(rename = "Завершено", alias = "completed")]
    Completed,
    #[serde(rename = "Заморожено", alias = "hiatus")]
    Hiatus,
    #[serde(rename = "Анонс", alias = "announced")]
    Announced,
}

impl TitleStatus {
    /// Every status, in catalog display order
    pub const ALL: [TitleStatus; 4] = [
        Self::Ongoing,
        Self::Completed,
        Self::Hiatus,
        Self::Announced,
    ];

    /// Returns the stored display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ongoing => "Онгоинг",
            Self::Completed => "Завершено",
            Self::Hiatus => "Заморожено",
            Self::Announced => "Анонс",
        }
    }

    fn ascii_name(&self) -> &'static str {
        match self {
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Hiatus => "hiatus",
            Self::Announced => "announced",
        }
    }
}

impl fmt::Display for TitleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TitleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.ascii_name() == needle || t.label().to_lowercase() == needle)
            .ok_or_else(|| format!("unknown title status '{}'", s))
    }
}

/// A manga title in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub id: TitleId,
    pub slug: String,
    #[serde(rename = "title")]
    pub name: String,
    #[serde(default)]
    pub alt_titles: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover: String,
    #[serde(rename = "type")]
    pub kind: TitleType,
    pub status: TitleStatus,
    pub year: i32,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub rating: f32, // 0-10
    #[serde(default)]
    pub rating_count: u32,
    #[serde(default)]
    pub chapters_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Title {
    /// Creates a new title, deriving the slug from its name
    pub fn new(name: impl Into<String>, kind: TitleType, status: TitleStatus, year: i32) -> Self {
        let name = name.into();
        let now = Timestamp::now();
        Self {
            id: TitleId::new(),
            slug: generate_slug(&name),
            name,
            alt_titles: Vec::new(),
            description: String::new(),
            cover: String::new(),
            kind,
            status,
            year,
            author: String::new(),
            artist: String::new(),
            genres: Vec::new(),
            views: 0,
            rating: 0.0,
            rating_count: 0,
            chapters_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the title carries the given genre tag
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// Returns true if any chapters have been published
    pub fn has_chapters(&self) -> bool {
        self.chapters_count > 0
    }

    /// Records a change to the title
    pub fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

impl Validator for Title {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.id.as_str().is_empty() {
            errors.push("Title id cannot be empty".to_string());
        }

        if self.name.trim().is_empty() {
            errors.push("Title cannot be empty".to_string());
        }

        if self.slug.is_empty() {
            errors.push("Slug cannot be empty".to_string());
        }

        if !(0.0..=10.0).contains(&self.rating) {
            errors.push("Rating must be between 0 and 10".to_string());
        }

        if self.updated_at < self.created_at {
            errors.push("Update time cannot precede creation time".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A chapter belonging to a title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: ChapterId,
    #[serde(rename = "mangaId")]
    pub title_id: TitleId,
    pub number: f64,
    #[serde(default)]
    pub volume: Option<u32>,
    #[serde(default, with = "empty_as_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub pages: Vec<String>,
    #[serde(default)]
    pub translator: String,
    #[serde(default)]
    pub views: u64,
    pub created_at: Timestamp,
}

impl Chapter {
    /// Creates a new chapter with no pages
    pub fn new(title_id: TitleId, number: f64) -> Self {
        Self {
            id: ChapterId::new(),
            title_id,
            number,
            volume: None,
            title: None,
            pages: Vec::new(),
            translator: String::new(),
            views: 0,
            created_at: Timestamp::now(),
        }
    }

    /// Returns the number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Returns the index of the last page, if there are pages
    pub fn last_page_index(&self) -> Option<usize> {
        self.pages.len().checked_sub(1)
    }

    /// Returns a heading such as "Глава 3. Начало"
    pub fn heading(&self) -> String {
        match self.title.as_deref() {
            Some(title) => format!("Глава {}. {}", self.number, title),
            None => format!("Глава {}", self.number),
        }
    }
}

impl Validator for Chapter {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.id.as_str().is_empty() || self.title_id.as_str().is_empty() {
            errors.push("Chapter and title ids cannot be empty".to_string());
        }

        if !(self.number.is_finite() && self.number > 0.0) {
            errors.push("Chapter number must be positive".to_string());
        }

        if self.pages.iter().any(|p| p.trim().is_empty()) {
            errors.push("Page references cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Chapter titles are persisted as "" when absent
mod empty_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.filter(|s| !s.is_empty()))
    }
}
