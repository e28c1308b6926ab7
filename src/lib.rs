//! Captr library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Top-level screens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    /// Hero, video carousel and URL input.
    #[default]
    Landing,
    /// Notes chat beside the document canvas.
    Notes,
    /// Preview/Code prototype chat.
    Prototype,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Screen::Landing => "Home",
            Screen::Notes => "Notes workspace",
            Screen::Prototype => "Prototype",
        }
    }
}
