use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::settings::TopicFilter;

/// Screen-level state of a quiz app instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameState {
    SubjectSelection,
    Loading,
    Menu,
    Playing,
    Result,
    Error,
}

impl GameState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SubjectSelection => "subject-selection",
            Self::Loading => "loading",
            Self::Menu => "menu",
            Self::Playing => "playing",
            Self::Result => "result",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-fatal notice raised by `start_game`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Advisory {
    /// The topic filter matched nothing; the game did not start.
    NoQuestions { topic: TopicFilter },
    /// Fewer questions exist than were requested; the session was shortened.
    InsufficientQuestions { requested: u32, available: u32 },
}

impl Advisory {
    /// True when the advisory blocked the session from starting.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::NoQuestions { .. })
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoQuestions { topic } => {
                write!(f, "No questions found for topic \"{topic}\".")
            }
            Self::InsufficientQuestions {
                requested,
                available,
            } => write!(
                f,
                "You requested {requested} questions, but only {available} are available. \
                 Proceeding with {available} questions."
            ),
        }
    }
}
