use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use quiz_core::Elapsed;
use quiz_core::model::{
    Advisory, BankConfig, GameState, Question, QuestionId, Score, Settings, SettingsPatch,
    TopicFilter, topic_menu,
};

use super::plan::SessionBuilder;
use super::snapshot::QuizSnapshot;
use crate::error::{SessionError, SourceError};

//
// ─── LOAD TICKETS ──────────────────────────────────────────────────────────────
//

/// Handle for one in-flight bank load.
///
/// A ticket only completes the load it was issued for; results for a bank the
/// user has since left are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    bank: BankConfig,
    generation: u64,
}

impl LoadTicket {
    #[must_use]
    pub fn bank(&self) -> &BankConfig {
        &self.bank
    }
}

/// Whether the app offers a choice of banks or is pinned to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BankMode {
    Catalog,
    Single,
}

/// Outcome of `QuizState::start_game`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// The game is running; `advisory` is set when the session was shortened.
    Started { advisory: Option<Advisory> },
    /// Nothing matched the settings; still on the menu.
    Blocked(Advisory),
    /// Not on the menu; nothing changed.
    Ignored,
}

impl StartOutcome {
    #[must_use]
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// The quiz state machine.
///
/// Every action is synchronous and either applies completely or leaves the
/// state untouched; actions called from a state where they make no sense
/// return `false` (or `StartOutcome::Ignored`).
#[derive(Debug, Clone)]
pub struct QuizState {
    mode: BankMode,
    game_state: GameState,
    selected_bank: Option<BankConfig>,
    default_settings: Settings,
    settings: Settings,
    questions: Vec<Question>,
    topics: Vec<String>,
    current_session: Vec<Question>,
    current_index: usize,
    answers: BTreeMap<QuestionId, String>,
    elapsed: Elapsed,
    timer_running: bool,
    error: Option<String>,
    advisory: Option<Advisory>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    load_generation: u64,
}

impl QuizState {
    /// Start on the subject selection screen.
    #[must_use]
    pub fn with_catalog(defaults: Settings) -> Self {
        Self::blank(BankMode::Catalog, GameState::SubjectSelection, defaults)
    }

    /// Start directly in `Loading` for `bank`; complete the returned ticket to reach the menu.
    #[must_use]
    pub fn single_bank(bank: BankConfig, defaults: Settings) -> (Self, LoadTicket) {
        let mut state = Self::blank(BankMode::Single, GameState::Loading, defaults);
        let ticket = state.begin_load(bank);
        (state, ticket)
    }

    fn blank(mode: BankMode, game_state: GameState, defaults: Settings) -> Self {
        Self {
            mode,
            game_state,
            selected_bank: None,
            settings: defaults.clone(),
            default_settings: defaults,
            questions: Vec::new(),
            topics: Vec::new(),
            current_session: Vec::new(),
            current_index: 0,
            answers: BTreeMap::new(),
            elapsed: Elapsed::ZERO,
            timer_running: false,
            error: None,
            advisory: None,
            started_at: None,
            finished_at: None,
            load_generation: 0,
        }
    }

    // ─── Accessors ────────────────────────────────────────────────────────

    #[must_use]
    pub fn mode(&self) -> BankMode {
        self.mode
    }

    #[must_use]
    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    #[must_use]
    pub fn selected_bank(&self) -> Option<&BankConfig> {
        self.selected_bank.as_ref()
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    #[must_use]
    pub fn current_session(&self) -> &[Question] {
        &self.current_session
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_session.get(self.current_index)
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<QuestionId, String> {
        &self.answers
    }

    #[must_use]
    pub fn elapsed(&self) -> Elapsed {
        self.elapsed
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.timer_running
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn advisory(&self) -> Option<&Advisory> {
        self.advisory.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> Score {
        Score::tally(&self.current_session, &self.answers)
    }

    /// The ticket of the load currently in flight, if any.
    #[must_use]
    pub fn pending_load(&self) -> Option<LoadTicket> {
        match (self.game_state, &self.selected_bank) {
            (GameState::Loading, Some(bank)) => Some(LoadTicket {
                bank: bank.clone(),
                generation: self.load_generation,
            }),
            _ => None,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot {
            mode: self.mode,
            game_state: self.game_state,
            selected_bank: self.selected_bank.clone(),
            settings: self.settings.clone(),
            questions: self.questions.clone(),
            topics: self.topics.clone(),
            current_session: self.current_session.clone(),
            current_index: self.current_index,
            answers: self.answers.clone(),
            elapsed: self.elapsed,
            timer_running: self.timer_running,
            error: self.error.clone(),
            advisory: self.advisory.clone(),
            started_at: self.started_at,
            finished_at: self.finished_at,
        }
    }

    // ─── Loading ──────────────────────────────────────────────────────────

    fn begin_load(&mut self, bank: BankConfig) -> LoadTicket {
        self.load_generation = self.load_generation.wrapping_add(1);
        self.selected_bank = Some(bank.clone());
        self.error = None;
        self.game_state = GameState::Loading;
        LoadTicket {
            bank,
            generation: self.load_generation,
        }
    }

    /// `subject-selection → loading`.
    pub fn select_bank(&mut self, bank: BankConfig) -> Option<LoadTicket> {
        if self.mode != BankMode::Catalog || self.game_state != GameState::SubjectSelection {
            return None;
        }
        Some(self.begin_load(bank))
    }

    /// `error → loading`, fetching the same bank again.
    pub fn retry_load(&mut self) -> Option<LoadTicket> {
        if self.game_state != GameState::Error {
            return None;
        }
        let bank = self.selected_bank.clone()?;
        Some(self.begin_load(bank))
    }

    /// Apply a finished fetch. Returns `false` for stale tickets.
    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Vec<Question>, SourceError>,
    ) -> bool {
        if self.game_state != GameState::Loading || ticket.generation != self.load_generation {
            return false;
        }

        match result {
            Ok(questions) if questions.is_empty() => {
                self.fail_load(SourceError::Empty.to_string());
            }
            Ok(questions) => {
                self.topics = topic_menu(&questions);
                self.questions = questions;
                self.settings.topic = TopicFilter::All;
                self.error = None;
                self.game_state = GameState::Menu;
            }
            Err(err) => self.fail_load(err.to_string()),
        }
        true
    }

    fn fail_load(&mut self, message: String) {
        self.questions.clear();
        self.topics.clear();
        self.error = Some(message);
        self.game_state = GameState::Error;
    }

    // ─── Menu ─────────────────────────────────────────────────────────────

    /// Merge a partial settings update. Ignored while a game is running.
    pub fn update_settings(&mut self, patch: SettingsPatch) -> bool {
        if self.game_state == GameState::Playing || patch.is_empty() {
            return false;
        }
        self.settings.apply(patch);
        true
    }

    /// `menu → playing`.
    pub fn start_game<R: Rng + ?Sized>(&mut self, rng: &mut R, now: DateTime<Utc>) -> StartOutcome {
        if self.game_state != GameState::Menu {
            return StartOutcome::Ignored;
        }

        let plan = match SessionBuilder::new(&self.questions, &self.settings).build(rng) {
            Ok(plan) => plan,
            Err(SessionError::NoQuestions { topic }) => {
                let advisory = Advisory::NoQuestions { topic };
                self.advisory = Some(advisory.clone());
                return StartOutcome::Blocked(advisory);
            }
        };

        self.current_session = plan.questions;
        self.current_index = 0;
        self.answers.clear();
        self.elapsed = Elapsed::ZERO;
        self.timer_running = self.settings.timer_enabled;
        self.advisory = plan.shortfall.clone();
        self.started_at = Some(now);
        self.finished_at = None;
        self.game_state = GameState::Playing;

        StartOutcome::Started {
            advisory: plan.shortfall,
        }
    }

    // ─── Playing ──────────────────────────────────────────────────────────

    /// True while the timer is enabled but paused; answers are locked then.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.game_state == GameState::Playing && self.settings.timer_enabled && !self.timer_running
    }

    /// Record `option` for the current question, replacing any earlier answer.
    pub fn answer_question(&mut self, option: &str) -> bool {
        if self.game_state != GameState::Playing || self.is_paused() {
            return false;
        }
        let Some(question) = self.current_session.get(self.current_index) else {
            return false;
        };
        if !question.has_option(option) {
            return false;
        }
        self.answers.insert(question.id(), option.to_owned());
        true
    }

    pub fn next_question(&mut self) -> bool {
        if self.game_state != GameState::Playing
            || self.current_index + 1 >= self.current_session.len()
        {
            return false;
        }
        self.current_index += 1;
        true
    }

    pub fn prev_question(&mut self) -> bool {
        if self.game_state != GameState::Playing || self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }

    pub fn go_to_question(&mut self, index: usize) -> bool {
        if self.game_state != GameState::Playing || index >= self.current_session.len() {
            return false;
        }
        self.current_index = index;
        true
    }

    /// Pause or resume the clock. Only possible when the timer is enabled.
    pub fn toggle_timer(&mut self) -> bool {
        if self.game_state != GameState::Playing || !self.settings.timer_enabled {
            return false;
        }
        self.timer_running = !self.timer_running;
        true
    }

    /// One second of play time.
    pub fn tick(&mut self) -> bool {
        if self.game_state != GameState::Playing || !self.timer_running {
            return false;
        }
        self.elapsed = self.elapsed.tick();
        true
    }

    /// `playing → result`.
    pub fn finish_game(&mut self, now: DateTime<Utc>) -> bool {
        if self.game_state != GameState::Playing {
            return false;
        }
        self.timer_running = false;
        self.finished_at = Some(now);
        self.game_state = GameState::Result;
        true
    }

    // ─── Leaving a game ───────────────────────────────────────────────────

    /// Back to the menu with the session discarded. Settings are kept.
    pub fn restart_game(&mut self) -> bool {
        if !matches!(
            self.game_state,
            GameState::Menu | GameState::Playing | GameState::Result
        ) {
            return false;
        }
        self.clear_session();
        self.game_state = GameState::Menu;
        true
    }

    /// Drop the loaded bank and return to subject selection.
    pub fn back_to_subjects(&mut self) -> bool {
        if self.mode != BankMode::Catalog
            || !matches!(
                self.game_state,
                GameState::SubjectSelection | GameState::Menu | GameState::Result | GameState::Error
            )
        {
            return false;
        }
        self.clear_session();
        self.questions.clear();
        self.topics.clear();
        self.selected_bank = None;
        self.error = None;
        self.settings = self.default_settings.clone();
        self.load_generation = self.load_generation.wrapping_add(1);
        self.game_state = GameState::SubjectSelection;
        true
    }

    fn clear_session(&mut self) {
        self.current_session.clear();
        self.current_index = 0;
        self.answers.clear();
        self.elapsed = Elapsed::ZERO;
        self.timer_running = false;
        self.advisory = None;
        self.started_at = None;
        self.finished_at = None;
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
