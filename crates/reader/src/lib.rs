//! Yamiko Reader - page navigation for manga chapters

mod debounce;
mod input;
mod navigator;
mod session;
mod settings;

pub use debounce::{SearchDebouncer, DEFAULT_QUANTUM, DEFAULT_RESULT_LIMIT};
pub use input::{command_for_click, command_for_key, command_for_slider, Key, ReaderCommand};
pub use navigator::{Direction, Landing, Navigation, ReaderNavigator};
pub use session::{ReaderSession, SessionEvent};
pub use settings::{DisplaySettings, Visibility};
pub use yamiko_core::{ReaderBackground, ReaderFit, ReaderMode};
