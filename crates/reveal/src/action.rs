//! The action vocabulary shared by buttons, keys and gestures.

use serde::{Deserialize, Serialize};

/// A discrete user intent, whatever input produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Reveal one more tile.
    Uncover,
    /// Cover the image completely again.
    Reset,
    /// Reveal the whole image.
    Clear,
    Next,
    Previous,
    Info,
    Load,
    OpenSettings,
    CommitSettings,
    ResetSettings,
}

impl Action {
    pub fn all() -> &'static [Action] {
        &[
            Action::Uncover,
            Action::Reset,
            Action::Clear,
            Action::Next,
            Action::Previous,
            Action::Info,
            Action::Load,
            Action::OpenSettings,
            Action::CommitSettings,
            Action::ResetSettings,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Uncover => "uncover",
            Action::Reset => "reset",
            Action::Clear => "clear",
            Action::Next => "next",
            Action::Previous => "previous",
            Action::Info => "info",
            Action::Load => "load",
            Action::OpenSettings => "open-settings",
            Action::CommitSettings => "commit-settings",
            Action::ResetSettings => "reset-settings",
        }
    }

    pub fn from_name(name: &str) -> Option<Action> {
        let name = name.to_ascii_lowercase().replace('_', "-");
        Action::all().iter().copied().find(|a| a.name() == name)
    }

    /// Map a host key name (DOM `KeyboardEvent.key` style) to an action.
    pub fn from_key(key: &str) -> Option<Action> {
        match key {
            "ArrowRight" | "n" | "PageDown" => Some(Action::Next),
            "ArrowLeft" | "p" | "PageUp" => Some(Action::Previous),
            " " | "Enter" | "u" => Some(Action::Uncover),
            "ArrowUp" | "r" => Some(Action::Reset),
            "ArrowDown" | "c" => Some(Action::Clear),
            "i" => Some(Action::Info),
            "l" => Some(Action::Load),
            "s" => Some(Action::OpenSettings),
            _ => None,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
