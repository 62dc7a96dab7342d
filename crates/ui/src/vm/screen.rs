use quiz_core::model::GameState;
use services::{BankCatalog, QuizSnapshot};

use crate::vm::{GameVm, MenuVm, ResultVm, SubjectCardVm, map_subject_cards};

/// Everything one screen needs, derived from a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Subjects(Vec<SubjectCardVm>),
    Loading { bank_name: String },
    Menu(MenuVm),
    Game(GameVm),
    Result(ResultVm),
    Error { message: String, can_change_subject: bool },
}

impl Screen {
    #[must_use]
    pub fn from_snapshot(snapshot: &QuizSnapshot, catalog: &BankCatalog) -> Self {
        let bank_name = || {
            snapshot
                .selected_bank
                .as_ref()
                .map(|bank| bank.name.clone())
                .unwrap_or_default()
        };

        match snapshot.game_state {
            GameState::SubjectSelection => Self::Subjects(map_subject_cards(catalog)),
            GameState::Loading => Self::Loading {
                bank_name: bank_name(),
            },
            GameState::Menu => Self::Menu(MenuVm::from_snapshot(snapshot)),
            // A running game always has a current question.
            GameState::Playing => GameVm::from_snapshot(snapshot)
                .map_or_else(|| Self::Menu(MenuVm::from_snapshot(snapshot)), Self::Game),
            GameState::Result => Self::Result(ResultVm::from_snapshot(snapshot)),
            GameState::Error => Self::Error {
                message: snapshot
                    .error
                    .clone()
                    .unwrap_or_else(|| "failed to load questions".to_owned()),
                can_change_subject: snapshot.mode == services::BankMode::Catalog,
            },
        }
    }

    #[must_use]
    pub fn game_state(&self) -> GameState {
        match self {
            Self::Subjects(_) => GameState::SubjectSelection,
            Self::Loading { .. } => GameState::Loading,
            Self::Menu(_) => GameState::Menu,
            Self::Game(_) => GameState::Playing,
            Self::Result(_) => GameState::Result,
            Self::Error { .. } => GameState::Error,
        }
    }
}
