//! Page navigation within a chapter

use yamiko_core::ReaderMode;

/// Direction of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Page to land on after a chapter transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    FirstPage,
    LastPage,
}

/// Outcome of an advance or retreat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Nothing happened
    Unchanged,
    /// The current page moved
    PageChanged { from: usize, to: usize },
    /// The host should open the adjacent chapter
    ChapterTransition { direction: Direction, landing: Landing },
    /// Continuous mode: the host should scroll the strip
    Scroll(Direction),
}

/// Tracks the current page of one chapter and whether neighbors exist
///
/// The page index always stays within `[0, page_count - 1]`, or at 0 for a
/// chapter without pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderNavigator {
    page_count: usize,
    current_page: usize,
    mode: ReaderMode,
    has_prev_chapter: bool,
    has_next_chapter: bool,
}

impl ReaderNavigator {
    /// Creates a navigator on the first page with no neighboring chapters
    pub fn new(page_count: usize, mode: ReaderMode) -> Self {
        Self {
            page_count,
            current_page: 0,
            mode,
            has_prev_chapter: false,
            has_next_chapter: false,
        }
    }

    /// Sets whether previous and next chapters exist
    pub fn with_adjacency(mut self, has_prev: bool, has_next: bool) -> Self {
        self.has_prev_chapter = has_prev;
        self.has_next_chapter = has_next;
        self
    }

    /// Re-seats the navigator on a newly opened chapter
    pub fn load_chapter(&mut self, page_count: usize, landing: Landing, has_prev: bool, has_next: bool) {
        self.page_count = page_count;
        self.current_page = match landing {
            Landing::FirstPage => 0,
            Landing::LastPage => page_count.saturating_sub(1),
        };
        self.has_prev_chapter = has_prev;
        self.has_next_chapter = has_next;
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn mode(&self) -> ReaderMode {
        self.mode
    }

    /// Switches layout; the current page is kept
    pub fn set_mode(&mut self, mode: ReaderMode) {
        self.mode = mode;
    }

    pub fn has_prev_chapter(&self) -> bool {
        self.has_prev_chapter
    }

    pub fn has_next_chapter(&self) -> bool {
        self.has_next_chapter
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page + 1 >= self.page_count
    }

    /// Jumps to page `page`
    ///
    /// Out-of-range pages are ignored. Returns true if the page changed.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page >= self.page_count || page == self.current_page {
            return false;
        }
        log::debug!("Page {} -> {}", self.current_page, page);
        self.current_page = page;
        true
    }

    /// Moves one step forward
    pub fn advance(&mut self) -> Navigation {
        if !self.mode.is_paged() {
            return Navigation::Scroll(Direction::Forward);
        }

        if !self.is_last_page() {
            let from = self.current_page;
            self.go_to_page(from + 1);
            return Navigation::PageChanged {
                from,
                to: self.current_page,
            };
        }

        if self.has_next_chapter {
            log::debug!("End of chapter, requesting next chapter");
            return Navigation::ChapterTransition {
                direction: Direction::Forward,
                landing: Landing::FirstPage,
            };
        }

        Navigation::Unchanged
    }

    /// Moves one step backward
    pub fn retreat(&mut self) -> Navigation {
        if !self.mode.is_paged() {
            return Navigation::Scroll(Direction::Backward);
        }

        if !self.is_first_page() {
            let from = self.current_page;
            self.go_to_page(from - 1);
            return Navigation::PageChanged {
                from,
                to: self.current_page,
            };
        }

        if self.has_prev_chapter {
            log::debug!("Start of chapter, requesting previous chapter");
            return Navigation::ChapterTransition {
                direction: Direction::Backward,
                landing: Landing::LastPage,
            };
        }

        Navigation::Unchanged
    }

    /// Returns formatted page info (e.g., "3/15")
    pub fn progress(&self) -> String {
        if self.page_count == 0 {
            return "No pages".to_string();
        }
        format!("{}/{}", self.current_page + 1, self.page_count)
    }

    /// Returns the fraction of the chapter read, from 0.0 to 100.0
    pub fn progress_percentage(&self) -> f32 {
        if self.page_count == 0 {
            return 0.0;
        }
        ((self.current_page + 1) as f32 / self.page_count as f32) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paged(pages: usize) -> ReaderNavigator {
        ReaderNavigator::new(pages, ReaderMode::Horizontal)
    }

    #[test]
    fn test_starts_on_first_page() {
        let nav = paged(5);
        assert_eq!(nav.current_page(), 0);
        assert_eq!(nav.page_count(), 5);
        assert!(nav.is_first_page());
        assert!(!nav.is_last_page());
    }

    #[test]
    fn test_go_to_page() {
        let mut nav = paged(5);
        assert!(nav.go_to_page(3));
        assert_eq!(nav.current_page(), 3);

        // Same page is a no-op
        assert!(!nav.go_to_page(3));
        // Out of range is ignored
        assert!(!nav.go_to_page(5));
        assert!(!nav.go_to_page(usize::MAX));
        assert_eq!(nav.current_page(), 3);
    }

    #[test]
    fn test_advance_within_chapter() {
        let mut nav = paged(3);
        assert_eq!(nav.advance(), Navigation::PageChanged { from: 0, to: 1 });
        assert_eq!(nav.advance(), Navigation::PageChanged { from: 1, to: 2 });
        assert!(nav.is_last_page());
    }

    #[test]
    fn test_advance_past_last_page() {
        let mut nav = paged(2).with_adjacency(false, true);
        nav.go_to_page(1);

        assert_eq!(
            nav.advance(),
            Navigation::ChapterTransition {
                direction: Direction::Forward,
                landing: Landing::FirstPage,
            }
        );
        // Transition is only a request
        assert_eq!(nav.current_page(), 1);
    }

    #[test]
    fn test_advance_on_final_chapter_is_noop() {
        let mut nav = paged(2);
        nav.go_to_page(1);
        assert_eq!(nav.advance(), Navigation::Unchanged);
        assert_eq!(nav.current_page(), 1);
    }

    #[test]
    fn test_retreat_before_first_page() {
        let mut nav = paged(4).with_adjacency(true, false);
        assert_eq!(
            nav.retreat(),
            Navigation::ChapterTransition {
                direction: Direction::Backward,
                landing: Landing::LastPage,
            }
        );

        let mut nav = paged(4);
        assert_eq!(nav.retreat(), Navigation::Unchanged);
    }

    #[test]
    fn test_vertical_mode_scrolls() {
        let mut nav = ReaderNavigator::new(3, ReaderMode::Vertical).with_adjacency(true, true);
        assert_eq!(nav.advance(), Navigation::Scroll(Direction::Forward));
        assert_eq!(nav.retreat(), Navigation::Scroll(Direction::Backward));
        assert_eq!(nav.current_page(), 0);
    }

    #[test]
    fn test_single_mode_pages() {
        let mut nav = ReaderNavigator::new(3, ReaderMode::Single);
        assert_eq!(nav.advance(), Navigation::PageChanged { from: 0, to: 1 });
    }

    #[test]
    fn test_load_chapter_landings() {
        let mut nav = paged(3);
        nav.go_to_page(2);

        nav.load_chapter(7, Landing::FirstPage, true, true);
        assert_eq!(nav.current_page(), 0);
        assert_eq!(nav.page_count(), 7);

        nav.load_chapter(7, Landing::LastPage, true, false);
        assert_eq!(nav.current_page(), 6);
        assert!(!nav.has_next_chapter());

        nav.load_chapter(0, Landing::LastPage, false, false);
        assert_eq!(nav.current_page(), 0);
    }

    #[test]
    fn test_empty_chapter() {
        let mut nav = paged(0).with_adjacency(false, true);
        assert!(!nav.go_to_page(0));
        assert!(matches!(nav.advance(), Navigation::ChapterTransition { .. }));
        assert_eq!(nav.progress(), "No pages");
        assert_eq!(nav.progress_percentage(), 0.0);
    }

    #[test]
    fn test_progress() {
        let mut nav = paged(4);
        assert_eq!(nav.progress(), "1/4");
        nav.go_to_page(3);
        assert_eq!(nav.progress(), "4/4");
        assert_eq!(nav.progress_percentage(), 100.0);
    }

    #[test]
    fn test_page_stays_in_bounds() {
        for pages in 1..6 {
            let mut nav = paged(pages).with_adjacency(true, true);
            for step in 0..20 {
                if step % 3 == 0 {
                    nav.retreat();
                } else {
                    nav.advance();
                }
                assert!(nav.current_page() < pages);
            }
        }
    }
}
