use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use quiz_core::Elapsed;
use quiz_core::model::{
    Advisory, BankConfig, GameState, Question, QuestionId, ReviewEntry, Score, Settings, review,
};

use super::state::BankMode;

/// Owned, read-only copy of the controller state for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct QuizSnapshot {
    pub mode: BankMode,
    pub game_state: GameState,
    pub selected_bank: Option<BankConfig>,
    pub settings: Settings,
    pub questions: Vec<Question>,
    pub topics: Vec<String>,
    pub current_session: Vec<Question>,
    pub current_index: usize,
    pub answers: BTreeMap<QuestionId, String>,
    pub elapsed: Elapsed,
    pub timer_running: bool,
    pub error: Option<String>,
    pub advisory: Option<Advisory>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl QuizSnapshot {
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_session.get(self.current_index)
    }

    #[must_use]
    pub fn answer_for(&self, id: QuestionId) -> Option<&str> {
        self.answers.get(&id).map(String::as_str)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.game_state == GameState::Playing && self.settings.timer_enabled && !self.timer_running
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.current_index > 0
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.current_index + 1 < self.current_session.len()
    }

    #[must_use]
    pub fn score(&self) -> Score {
        Score::tally(&self.current_session, &self.answers)
    }

    #[must_use]
    pub fn review(&self) -> Vec<ReviewEntry<'_>> {
        review(&self.current_session, &self.answers)
    }
}
