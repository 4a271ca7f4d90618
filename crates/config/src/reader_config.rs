//! `[reader]` section: how a freshly opened chapter is displayed

use crate::validation::{ConfigSection, ValidationError};
use serde::{Deserialize, Serialize};
use yamiko_core::{ReaderBackground, ReaderFit, ReaderMode};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReaderConfig {
    pub default_mode: ReaderMode,
    pub default_fit: ReaderFit,
    pub default_background: ReaderBackground,

    /// Whether the header and page controls start visible
    pub show_ui: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            default_mode: ReaderMode::Vertical,
            default_fit: ReaderFit::Width,
            default_background: ReaderBackground::Black,
            show_ui: true,
        }
    }
}

impl ConfigSection for ReaderConfig {
    /// Every combination of the enums is usable
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Ok(())
    }

    fn merge(&mut self, other: Self) {
        *self = other;
    }

    fn section_name(&self) -> &'static str {
        "reader"
    }
}
