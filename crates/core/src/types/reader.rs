//! Reader display preferences

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How pages of a chapter are laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReaderMode {
    /// All pages stacked, navigation by scrolling
    #[default]
    Vertical,
    /// One page at a time, left/right paging
    Horizontal,
    /// One page at a time, no strip
    Single,
}

impl ReaderMode {
    pub const ALL: [ReaderMode; 3] = [Self::Vertical, Self::Horizontal, Self::Single];

    /// Returns true if the mode shows one page at a time
    pub fn is_paged(&self) -> bool {
        !matches!(self, Self::Vertical)
    }
}

/// How a page image is scaled to the viewport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReaderFit {
    #[default]
    Width,
    Height,
    Original,
}

impl ReaderFit {
    pub const ALL: [ReaderFit; 3] = [Self::Width, Self::Height, Self::Original];
}

/// Background behind the pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReaderBackground {
    #[default]
    Black,
    Dark,
    White,
}

impl ReaderBackground {
    pub const ALL: [ReaderBackground; 3] = [Self::Black, Self::Dark, Self::White];
}

macro_rules! lowercase_names {
    ($ty:ty { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Returns the lowercase name used in settings files
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($name => Ok(Self::$variant),)+
                    other => Err(format!("unknown {} '{}'", stringify!($ty), other)),
                }
            }
        }
    };
}

lowercase_names!(ReaderMode {
    Vertical => "vertical",
    Horizontal => "horizontal",
    Single => "single",
});

lowercase_names!(ReaderFit {
    Width => "width",
    Height => "height",
    Original => "original",
});

lowercase_names!(ReaderBackground {
    Black => "black",
    Dark => "dark",
    White => "white",
});
