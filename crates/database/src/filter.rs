//! Multi-predicate title filtering and sort policies

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use yamiko_core::{Title, TitleStatus, TitleType};

/// Ordering applied after filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Highest rating first
    Rating,
    /// Most views first
    Popular,
    /// Most recently updated first
    #[default]
    Updated,
    /// Most recently created first
    New,
    /// Alphabetical by display name
    Title,
    /// Most chapters first
    Chapters,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        Self::Rating,
        Self::Popular,
        Self::Updated,
        Self::New,
        Self::Title,
        Self::Chapters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Popular => "popular",
            Self::Updated => "updated",
            Self::New => "new",
            Self::Title => "title",
            Self::Chapters => "chapters",
        }
    }

    /// Parses a sort key, falling back to [`SortKey::Updated`] for unknown input
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            log::debug!("Unknown sort key '{}', using default", s);
            Self::default()
        })
    }

    /// Compares two titles under this policy
    pub fn compare(&self, a: &Title, b: &Title) -> Ordering {
        match self {
            Self::Rating => b.rating.total_cmp(&a.rating),
            Self::Popular => b.views.cmp(&a.views),
            Self::Updated => b.updated_at.cmp(&a.updated_at),
            Self::New => b.created_at.cmp(&a.created_at),
            Self::Title => collate(&a.name, &b.name),
            Self::Chapters => b.chapters_count.cmp(&a.chapters_count),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rating" => Ok(Self::Rating),
            "popular" | "views" => Ok(Self::Popular),
            "updated" => Ok(Self::Updated),
            "new" | "created" => Ok(Self::New),
            "title" | "alphabetical" => Ok(Self::Title),
            "chapters" => Ok(Self::Chapters),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

/// Locale-aware string ordering for display names
///
/// Case-insensitive; `ё` collates with `е` and sorts right after it when
/// the names are otherwise equal. Names equal after folding fall back to
/// a raw comparison.
pub fn collate(a: &str, b: &str) -> Ordering {
    fn primary(s: &str) -> impl Iterator<Item = char> + '_ {
        s.chars()
            .flat_map(char::to_lowercase)
            .map(|c| if c == 'ё' { 'е' } else { c })
    }

    primary(a)
        .cmp(primary(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Filter predicates; every `None`/empty field is ignored
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    /// Substring of the display name or an alternate name
    pub search: Option<String>,
    pub kind: Option<TitleType>,
    pub status: Option<TitleStatus>,
    pub year: Option<i32>,
    /// Titles must carry all of these genres
    pub genres: Vec<String>,
    /// Minimum rating; zero is treated as no minimum
    pub min_rating: Option<f32>,
    pub has_chapters: bool,
    pub sort: SortKey,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_type(mut self, kind: TitleType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_status(mut self, status: TitleStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genres.push(genre.into());
        self
    }

    pub fn with_min_rating(mut self, min_rating: f32) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn with_chapters_only(mut self) -> Self {
        self.has_chapters = true;
        self
    }

    pub fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Returns true if `title` satisfies every active predicate
    pub fn matches(&self, title: &Title) -> bool {
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            let in_name = title.name.to_lowercase().contains(&needle);
            let in_alt = title
                .alt_titles
                .iter()
                .any(|alt| alt.to_lowercase().contains(&needle));
            if !(in_name || in_alt) {
                return false;
            }
        }

        if self.kind.is_some_and(|kind| title.kind != kind) {
            return false;
        }

        if self.status.is_some_and(|status| title.status != status) {
            return false;
        }

        if self.year.is_some_and(|year| title.year != year) {
            return false;
        }

        if !self.genres.iter().all(|genre| title.has_genre(genre)) {
            return false;
        }

        if let Some(min) = self.min_rating.filter(|m| *m > 0.0) {
            if title.rating < min {
                return false;
            }
        }

        if self.has_chapters && !title.has_chapters() {
            return false;
        }

        true
    }
}

/// Filters then sorts `titles`
///
/// Sorting is stable, so titles that compare equal keep their input order.
pub fn apply(titles: Vec<Title>, options: &FilterOptions) -> Vec<Title> {
    let mut result: Vec<Title> = titles.into_iter().filter(|t| options.matches(t)).collect();
    sort_titles(&mut result, options.sort);
    result
}

/// Stable in-place sort under `key`
pub fn sort_titles(titles: &mut [Title], key: SortKey) {
    titles.sort_by(|a, b| key.compare(a, b));
}
