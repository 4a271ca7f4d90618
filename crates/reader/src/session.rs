//! Reader session: one open chapter of one title

use crate::input::{command_for_click, command_for_key, Key, ReaderCommand};
use crate::navigator::{Direction, Landing, Navigation, ReaderNavigator};
use crate::settings::{DisplaySettings, Visibility};
use yamiko_core::{AppError, Chapter, ChapterId, ReaderBackground, ReaderFit, ReaderMode, Title, TitleId};
use yamiko_database::{Catalog, KeyValueStore};

/// What changed after handling a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Unchanged,
    PageChanged { page: usize },
    ChapterChanged { chapter: ChapterId, page: usize },
    Scroll(Direction),
    UiVisibility(bool),
    Fullscreen(bool),
}

/// Reading state for one title, backed by the catalog
///
/// Chapter adjacency is looked up in the catalog whenever a chapter opens,
/// never stored.
#[derive(Debug)]
pub struct ReaderSession<'a, S: KeyValueStore> {
    catalog: &'a Catalog<S>,
    title: Title,
    chapter: Chapter,
    navigator: ReaderNavigator,
    settings: DisplaySettings,
    visibility: Visibility,
}

impl<'a, S: KeyValueStore> ReaderSession<'a, S> {
    /// Opens `chapter_id` of `title_id` on its first page
    pub fn open(
        catalog: &'a Catalog<S>,
        title_id: &TitleId,
        chapter_id: &ChapterId,
        settings: DisplaySettings,
    ) -> Result<Self, AppError> {
        let title = catalog
            .get_by_id(title_id)
            .ok_or_else(|| AppError::not_found("Title", title_id))?;
        let chapter = catalog
            .get_chapter_by_id(chapter_id)
            .filter(|c| &c.title_id == title_id)
            .ok_or_else(|| AppError::not_found("Chapter", chapter_id))?;

        Ok(Self::start(catalog, title, chapter, settings))
    }

    /// Opens a title by slug, at chapter `number` or at its first chapter
    pub fn open_by_slug(
        catalog: &'a Catalog<S>,
        slug: &str,
        number: Option<f64>,
        settings: DisplaySettings,
    ) -> Result<Self, AppError> {
        let title = catalog
            .get_by_slug(slug)
            .ok_or_else(|| AppError::not_found("Title", slug))?;

        let chapter = match number {
            Some(n) => catalog
                .get_chapters_by_title(&title.id)
                .into_iter()
                .find(|c| c.number == n),
            None => catalog.get_first_chapter(&title.id),
        };
        let chapter = chapter.ok_or_else(|| {
            AppError::not_found(
                "Chapter",
                number.map_or_else(|| format!("{} (first)", slug), |n| format!("{} #{}", slug, n)),
            )
        })?;

        Ok(Self::start(catalog, title, chapter, settings))
    }

    fn start(catalog: &'a Catalog<S>, title: Title, chapter: Chapter, settings: DisplaySettings) -> Self {
        let has_prev = catalog.get_prev_chapter(&title.id, chapter.number).is_some();
        let has_next = catalog.get_next_chapter(&title.id, chapter.number).is_some();
        let navigator =
            ReaderNavigator::new(chapter.page_count(), settings.mode).with_adjacency(has_prev, has_next);

        log::info!("Opened '{}' {}", title.name, chapter.heading());
        Self {
            catalog,
            title,
            chapter,
            navigator,
            settings,
            visibility: Visibility::default(),
        }
    }

    /// Replaces the initial chrome visibility
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn chapter(&self) -> &Chapter {
        &self.chapter
    }

    pub fn navigator(&self) -> &ReaderNavigator {
        &self.navigator
    }

    pub fn settings(&self) -> DisplaySettings {
        self.settings
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn visibility_mut(&mut self) -> &mut Visibility {
        &mut self.visibility
    }

    pub fn current_page(&self) -> usize {
        self.navigator.current_page()
    }

    /// Image reference of the current page
    pub fn current_page_image(&self) -> Option<&str> {
        self.chapter
            .pages
            .get(self.navigator.current_page())
            .map(String::as_str)
    }

    /// Chapters of the open title, for the chapter list
    pub fn chapters(&self) -> Vec<Chapter> {
        self.catalog.get_chapters_by_title(&self.title.id)
    }

    pub fn set_mode(&mut self, mode: ReaderMode) {
        self.settings.mode = mode;
        self.navigator.set_mode(mode);
    }

    pub fn set_fit(&mut self, fit: ReaderFit) {
        self.settings.fit = fit;
    }

    pub fn set_background(&mut self, background: ReaderBackground) {
        self.settings.background = background;
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.navigator.go_to_page(page)
    }

    pub fn advance(&mut self) -> SessionEvent {
        let navigation = self.navigator.advance();
        self.resolve(navigation)
    }

    pub fn retreat(&mut self) -> SessionEvent {
        let navigation = self.navigator.retreat();
        self.resolve(navigation)
    }

    /// Opens the next chapter on its first page; false if there is none
    pub fn next_chapter(&mut self) -> bool {
        self.transition(Direction::Forward, Landing::FirstPage).is_some()
    }

    /// Opens the previous chapter on its first page; false if there is none
    pub fn prev_chapter(&mut self) -> bool {
        self.transition(Direction::Backward, Landing::FirstPage).is_some()
    }

    /// Opens another chapter of the same title on its first page
    pub fn go_to_chapter(&mut self, chapter_id: &ChapterId) -> Result<(), AppError> {
        let chapter = self
            .catalog
            .get_chapter_by_id(chapter_id)
            .filter(|c| c.title_id == self.title.id)
            .ok_or_else(|| AppError::not_found("Chapter", chapter_id))?;

        self.seat(chapter, Landing::FirstPage);
        self.visibility.close_panels();
        Ok(())
    }

    pub fn handle(&mut self, command: ReaderCommand) -> SessionEvent {
        match command {
            ReaderCommand::Advance => self.advance(),
            ReaderCommand::Retreat => self.retreat(),
            ReaderCommand::GoToPage(page) => {
                if self.go_to_page(page) {
                    SessionEvent::PageChanged { page }
                } else {
                    SessionEvent::Unchanged
                }
            }
            ReaderCommand::ToggleUi => SessionEvent::UiVisibility(self.visibility.toggle_ui()),
            ReaderCommand::ToggleFullscreen => {
                SessionEvent::Fullscreen(self.visibility.toggle_fullscreen())
            }
            ReaderCommand::ExitFullscreen => {
                if self.visibility.exit_fullscreen() {
                    SessionEvent::Fullscreen(false)
                } else {
                    SessionEvent::Unchanged
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: Key) -> SessionEvent {
        match command_for_key(key, self.visibility.fullscreen()) {
            Some(command) => self.handle(command),
            None => SessionEvent::Unchanged,
        }
    }

    pub fn handle_click(&mut self, x: f64, width: f64) -> SessionEvent {
        match command_for_click(x, width, self.settings.mode) {
            Some(command) => self.handle(command),
            None => SessionEvent::Unchanged,
        }
    }

    fn resolve(&mut self, navigation: Navigation) -> SessionEvent {
        match navigation {
            Navigation::Unchanged => SessionEvent::Unchanged,
            Navigation::PageChanged { to, .. } => SessionEvent::PageChanged { page: to },
            Navigation::Scroll(direction) => SessionEvent::Scroll(direction),
            Navigation::ChapterTransition { direction, landing } => self
                .transition(direction, landing)
                .unwrap_or(SessionEvent::Unchanged),
        }
    }

    fn transition(&mut self, direction: Direction, landing: Landing) -> Option<SessionEvent> {
        let target = match direction {
            Direction::Forward => self.catalog.get_next_chapter(&self.title.id, self.chapter.number),
            Direction::Backward => self.catalog.get_prev_chapter(&self.title.id, self.chapter.number),
        };

        let Some(chapter) = target else {
            log::debug!("No {:?} chapter after {}", direction, self.chapter.number);
            return None;
        };

        let id = chapter.id.clone();
        self.seat(chapter, landing);
        Some(SessionEvent::ChapterChanged {
            chapter: id,
            page: self.navigator.current_page(),
        })
    }

    fn seat(&mut self, chapter: Chapter, landing: Landing) {
        let has_prev = self
            .catalog
            .get_prev_chapter(&self.title.id, chapter.number)
            .is_some();
        let has_next = self
            .catalog
            .get_next_chapter(&self.title.id, chapter.number)
            .is_some();

        log::debug!("Chapter {} -> {}", self.chapter.number, chapter.number);
        self.navigator
            .load_chapter(chapter.page_count(), landing, has_prev, has_next);
        self.chapter = chapter;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yamiko_core::{TitleStatus, TitleType};
    use yamiko_database::MemoryStore;

    fn catalog_with(chapters: &[(f64, usize)]) -> (Catalog<MemoryStore>, TitleId, Vec<ChapterId>) {
        let mut catalog = Catalog::new(MemoryStore::new());
        let title = Title::new("Berserk", TitleType::Manga, TitleStatus::Ongoing, 1989);
        assert!(catalog.add_title(&title));

        let mut ids = Vec::new();
        for (number, pages) in chapters {
            let mut chapter = Chapter::new(title.id.clone(), *number);
            chapter.pages = (0..*pages).map(|p| format!("{}-{}.jpg", number, p)).collect();
            assert!(catalog.add_chapter(&chapter));
            ids.push(chapter.id.clone());
        }
        (catalog, title.id, ids)
    }

    fn paged() -> DisplaySettings {
        DisplaySettings {
            mode: ReaderMode::Horizontal,
            ..Default::default()
        }
    }

    #[test]
    fn test_open_unknown_ids() {
        let (catalog, title_id, ids) = catalog_with(&[(1.0, 3)]);

        let err = ReaderSession::open(&catalog, &TitleId::new(), &ids[0], paged()).unwrap_err();
        assert!(err.is_not_found());

        let err = ReaderSession::open(&catalog, &title_id, &ChapterId::new(), paged()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_open_rejects_foreign_chapter() {
        let (mut catalog, title_id, _) = catalog_with(&[]);
        let other = Title::new("Monster", TitleType::Manga, TitleStatus::Completed, 1994);
        assert!(catalog.add_title(&other));

        let mut chapter = Chapter::new(other.id.clone(), 1.0);
        chapter.pages = vec!["a.jpg".into()];
        assert!(catalog.add_chapter(&chapter));

        let err = ReaderSession::open(&catalog, &title_id, &chapter.id, paged()).unwrap_err();
        assert!(err.is_not_found());
        assert!(ReaderSession::open(&catalog, &other.id, &chapter.id, paged()).is_ok());
    }

    #[test]
    fn test_advance_across_chapters() {
        let (catalog, title_id, ids) = catalog_with(&[(1.0, 3), (2.0, 3), (3.0, 3)]);
        let mut session = ReaderSession::open(&catalog, &title_id, &ids[1], paged()).unwrap();

        assert_eq!(session.advance(), SessionEvent::PageChanged { page: 1 });
        assert_eq!(session.advance(), SessionEvent::PageChanged { page: 2 });
        assert_eq!(
            session.advance(),
            SessionEvent::ChapterChanged {
                chapter: ids[2].clone(),
                page: 0
            }
        );
        assert_eq!(session.chapter().number, 3.0);
        assert_eq!(session.current_page(), 0);
    }

    #[test]
    fn test_retreat_lands_on_last_page() {
        let (catalog, title_id, ids) = catalog_with(&[(1.0, 4), (2.0, 2)]);
        let mut session = ReaderSession::open(&catalog, &title_id, &ids[1], paged()).unwrap();

        assert_eq!(
            session.retreat(),
            SessionEvent::ChapterChanged {
                chapter: ids[0].clone(),
                page: 3
            }
        );
        assert!(!session.navigator().has_prev_chapter());
        assert!(session.navigator().has_next_chapter());
    }

    #[test]
    fn test_end_of_title_is_noop() {
        let (catalog, title_id, ids) = catalog_with(&[(1.0, 2)]);
        let mut session = ReaderSession::open(&catalog, &title_id, &ids[0], paged()).unwrap();

        session.go_to_page(1);
        assert_eq!(session.advance(), SessionEvent::Unchanged);
        assert_eq!(session.current_page(), 1);
        assert_eq!(session.chapter().id, ids[0]);
    }

    #[test]
    fn test_vertical_mode_scrolls_and_ignores_clicks() {
        let (catalog, title_id, ids) = catalog_with(&[(1.0, 3)]);
        let mut session =
            ReaderSession::open(&catalog, &title_id, &ids[0], DisplaySettings::default()).unwrap();

        assert_eq!(session.handle_key(Key::ArrowRight), SessionEvent::Scroll(Direction::Forward));
        assert_eq!(session.handle_click(5.0, 300.0), SessionEvent::Unchanged);
        assert_eq!(session.current_page(), 0);
    }

    #[test]
    fn test_keys_and_clicks() {
        let (catalog, title_id, ids) = catalog_with(&[(1.0, 3)]);
        let mut session = ReaderSession::open(&catalog, &title_id, &ids[0], paged()).unwrap();

        assert_eq!(session.handle_key(Key::Space), SessionEvent::PageChanged { page: 1 });
        assert_eq!(session.handle_click(5.0, 300.0), SessionEvent::PageChanged { page: 0 });
        assert_eq!(session.handle_click(150.0, 300.0), SessionEvent::UiVisibility(false));

        assert_eq!(session.handle_key(Key::Escape), SessionEvent::Unchanged);
        assert_eq!(session.handle_key(Key::Char('f')), SessionEvent::Fullscreen(true));
        assert_eq!(session.handle_key(Key::Escape), SessionEvent::Fullscreen(false));
    }

    #[test]
    fn test_slider_and_current_image() {
        let (catalog, title_id, ids) = catalog_with(&[(1.0, 3)]);
        let mut session = ReaderSession::open(&catalog, &title_id, &ids[0], paged()).unwrap();

        assert_eq!(session.handle(ReaderCommand::GoToPage(2)), SessionEvent::PageChanged { page: 2 });
        assert_eq!(session.handle(ReaderCommand::GoToPage(9)), SessionEvent::Unchanged);
        assert_eq!(session.current_page_image(), Some("1-2.jpg"));
    }

    #[test]
    fn test_chapter_jumps() {
        let (catalog, title_id, ids) = catalog_with(&[(1.0, 3), (2.0, 3)]);
        let mut session = ReaderSession::open(&catalog, &title_id, &ids[0], paged()).unwrap();
        session.go_to_page(2);

        assert!(session.next_chapter());
        assert_eq!(session.current_page(), 0);
        assert!(!session.next_chapter());

        session.visibility_mut().toggle_chapter_list();
        session.go_to_chapter(&ids[0]).unwrap();
        assert_eq!(session.chapter().number, 1.0);
        assert!(!session.visibility().chapter_list());

        assert!(session.go_to_chapter(&ChapterId::new()).is_err());
        assert_eq!(session.chapters().len(), 2);
    }

    #[test]
    fn test_open_by_slug() {
        let (catalog, _, _) = catalog_with(&[(1.0, 3), (2.0, 5)]);

        let session = ReaderSession::open_by_slug(&catalog, "berserk", None, paged()).unwrap();
        assert_eq!(session.chapter().number, 1.0);

        let session = ReaderSession::open_by_slug(&catalog, "berserk", Some(2.0), paged()).unwrap();
        assert_eq!(session.navigator().page_count(), 5);

        assert!(ReaderSession::open_by_slug(&catalog, "berserk", Some(9.0), paged()).is_err());
        assert!(ReaderSession::open_by_slug(&catalog, "monster", None, paged()).is_err());
    }

    #[test]
    fn test_mode_switch() {
        let (catalog, title_id, ids) = catalog_with(&[(1.0, 3)]);
        let mut session =
            ReaderSession::open(&catalog, &title_id, &ids[0], DisplaySettings::default()).unwrap();

        session.set_mode(ReaderMode::Single);
        assert_eq!(session.advance(), SessionEvent::PageChanged { page: 1 });
        session.set_fit(ReaderFit::Height);
        session.set_background(ReaderBackground::White);
        assert_eq!(session.settings().fit, ReaderFit::Height);
        assert_eq!(session.settings().background, ReaderBackground::White);
    }
}
