//! Reader display settings and panel visibility

use serde::{Deserialize, Serialize};
use yamiko_core::{ReaderBackground, ReaderFit, ReaderMode};

/// How pages are laid out and drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub mode: ReaderMode,
    pub fit: ReaderFit,
    pub background: ReaderBackground,
}

impl DisplaySettings {
    pub fn new(mode: ReaderMode, fit: ReaderFit, background: ReaderBackground) -> Self {
        Self {
            mode,
            fit,
            background,
        }
    }
}

/// Which parts of the reader chrome are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    ui: bool,
    settings_panel: bool,
    chapter_list: bool,
    fullscreen: bool,
}

impl Visibility {
    pub fn new(show_ui: bool) -> Self {
        Self {
            ui: show_ui,
            settings_panel: false,
            chapter_list: false,
            fullscreen: false,
        }
    }

    pub fn ui(&self) -> bool {
        self.ui
    }

    pub fn settings_panel(&self) -> bool {
        self.settings_panel
    }

    pub fn chapter_list(&self) -> bool {
        self.chapter_list
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Flips the UI chrome, returning the new state
    pub fn toggle_ui(&mut self) -> bool {
        self.ui = !self.ui;
        self.ui
    }

    /// Opening the settings panel closes the chapter list
    pub fn toggle_settings_panel(&mut self) -> bool {
        self.settings_panel = !self.settings_panel;
        if self.settings_panel {
            self.chapter_list = false;
        }
        self.settings_panel
    }

    /// Opening the chapter list closes the settings panel
    pub fn toggle_chapter_list(&mut self) -> bool {
        self.chapter_list = !self.chapter_list;
        if self.chapter_list {
            self.settings_panel = false;
        }
        self.chapter_list
    }

    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }

    /// Leaves fullscreen; returns true if it was active
    pub fn exit_fullscreen(&mut self) -> bool {
        std::mem::replace(&mut self.fullscreen, false)
    }

    /// Closes both side panels
    pub fn close_panels(&mut self) {
        self.settings_panel = false;
        self.chapter_list = false;
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::new(true)
    }
}
