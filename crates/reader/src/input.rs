//! Translation of raw input into reader commands

use std::str::FromStr;
use yamiko_core::ReaderMode;

/// Something the reader can be asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderCommand {
    Advance,
    Retreat,
    GoToPage(usize),
    ToggleUi,
    ToggleFullscreen,
    ExitFullscreen,
}

/// Keys the reader responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    Space,
    Escape,
    Char(char),
}

impl FromStr for Key {
    type Err = String;

    /// Parses keyboard key names such as `ArrowRight`, `" "` or `f`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArrowRight" => Ok(Self::ArrowRight),
            "ArrowLeft" => Ok(Self::ArrowLeft),
            " " | "Space" => Ok(Self::Space),
            "Escape" | "Esc" => Ok(Self::Escape),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Self::Char(c)),
                    _ => Err(format!("unknown key '{}'", s)),
                }
            }
        }
    }
}

/// Maps a key press to a command
///
/// Escape only does something while fullscreen is active.
pub fn command_for_key(key: Key, fullscreen: bool) -> Option<ReaderCommand> {
    match key {
        Key::ArrowRight | Key::Space => Some(ReaderCommand::Advance),
        Key::ArrowLeft => Some(ReaderCommand::Retreat),
        Key::Char('f') | Key::Char('F') => Some(ReaderCommand::ToggleFullscreen),
        Key::Escape if fullscreen => Some(ReaderCommand::ExitFullscreen),
        _ => None,
    }
}

/// Maps a click at `x` on a page of width `width` to a command
///
/// Left third retreats, right third advances, the middle toggles the UI.
/// Clicks do nothing in continuous mode or on a degenerate page.
pub fn command_for_click(x: f64, width: f64, mode: ReaderMode) -> Option<ReaderCommand> {
    if !mode.is_paged() || !(width.is_finite() && width > 0.0) || !x.is_finite() {
        return None;
    }

    let third = width / 3.0;
    if x < third {
        Some(ReaderCommand::Retreat)
    } else if x > third * 2.0 {
        Some(ReaderCommand::Advance)
    } else {
        Some(ReaderCommand::ToggleUi)
    }
}

/// Maps a slider position to a page jump
pub fn command_for_slider(page: usize) -> ReaderCommand {
    ReaderCommand::GoToPage(page)
}
