use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use quiz_core::Clock;
use quiz_core::model::{BankId, GameState, Settings, SettingsPatch};

use super::snapshot::QuizSnapshot;
use super::state::{LoadTicket, QuizState, StartOutcome};
use super::timer::SessionTimer;
use crate::catalog::BankCatalog;
use crate::error::CatalogError;
use crate::source::QuestionSource;

struct Inner {
    state: QuizState,
    rng: StdRng,
    timer: SessionTimer,
}

/// Owns one quiz instance and exposes the actions a view can trigger.
///
/// Actions take the state lock, apply one transition, reconcile the session
/// timer with the new state, and release the lock before returning. The bank
/// fetch runs without the lock held, so snapshots taken meanwhile show
/// `Loading`. Clones share the same instance.
///
/// Must be used from within a Tokio runtime: the session timer is a spawned task.
#[derive(Clone)]
pub struct QuizController {
    inner: Arc<Mutex<Inner>>,
    source: Arc<dyn QuestionSource>,
    catalog: BankCatalog,
    clock: Clock,
}

impl QuizController {
    /// A controller that starts on subject selection.
    #[must_use]
    pub fn new(catalog: BankCatalog, source: Arc<dyn QuestionSource>, defaults: Settings) -> Self {
        Self::from_state(QuizState::with_catalog(defaults), catalog, source)
    }

    /// A controller pinned to one bank. It starts in `Loading`; call
    /// [`QuizController::load`] to fetch the bank.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownBank` if `bank` is not in the catalog.
    pub fn single_bank(
        catalog: BankCatalog,
        bank: &BankId,
        source: Arc<dyn QuestionSource>,
        defaults: Settings,
    ) -> Result<Self, CatalogError> {
        let bank = catalog.require(bank)?.clone();
        let (state, _ticket) = QuizState::single_bank(bank, defaults);
        Ok(Self::from_state(state, catalog, source))
    }

    fn from_state(state: QuizState, catalog: BankCatalog, source: Arc<dyn QuestionSource>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state,
                rng: StdRng::from_os_rng(),
                timer: SessionTimer::default(),
            })),
            source,
            catalog,
            clock: Clock::system(),
        }
    }

    /// Make session shuffles reproducible.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        self.lock().rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_tick_period(self, period: Duration) -> Self {
        self.lock().timer = SessionTimer::new(period);
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &BankCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.lock().state.snapshot()
    }

    #[must_use]
    pub fn game_state(&self) -> GameState {
        self.lock().state.game_state()
    }

    /// Whether a timer task is currently scheduled.
    #[must_use]
    pub fn timer_active(&self) -> bool {
        self.lock().timer.is_active()
    }

    // ─── Loading ──────────────────────────────────────────────────────────

    /// Move from subject selection to `Loading` for bank `id` without fetching.
    /// Drive the fetch with [`QuizController::load`].
    ///
    /// Returns `Ok(false)` when not on subject selection.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownBank` for ids not in the catalog.
    pub fn choose_bank(&self, id: &BankId) -> Result<bool, CatalogError> {
        let bank = self.catalog.require(id)?.clone();
        let chosen = self.lock().state.select_bank(bank).is_some();
        if !chosen {
            debug!(bank = %id, "select_bank ignored");
        }
        Ok(chosen)
    }

    /// Pick a bank and load it.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownBank` for ids not in the catalog. Fetch
    /// failures are not errors here; they put the controller in `Error`.
    pub async fn select_bank(&self, id: &BankId) -> Result<bool, CatalogError> {
        if !self.choose_bank(id)? {
            return Ok(false);
        }
        self.load().await;
        Ok(true)
    }

    /// Fetch the bank the controller is currently loading, if any.
    pub async fn load(&self) -> bool {
        let ticket = self.lock().state.pending_load();
        let Some(ticket) = ticket else {
            return false;
        };
        self.run_load(ticket).await;
        true
    }

    /// From `Error`, go back to `Loading` for the same bank without fetching.
    pub fn begin_retry(&self) -> bool {
        let retried = self.lock().state.retry_load().is_some();
        if !retried {
            debug!("retry_load ignored");
        }
        retried
    }

    /// From `Error`, fetch the same bank again.
    pub async fn retry_load(&self) -> bool {
        if !self.begin_retry() {
            return false;
        }
        self.load().await
    }

    async fn run_load(&self, ticket: LoadTicket) {
        let bank = ticket.bank();
        info!(bank = %bank.id, source = %bank.source, "loading question bank");

        let result = self.source.fetch(bank).await;
        match &result {
            Ok(questions) => info!(bank = %bank.id, count = questions.len(), "question bank loaded"),
            Err(err) => warn!(bank = %bank.id, error = %err, "question bank failed to load"),
        }

        if !self.lock().state.complete_load(&ticket, result) {
            debug!(bank = %bank.id, "discarded stale bank load");
        }
    }

    // ─── Actions ──────────────────────────────────────────────────────────

    pub fn update_settings(&self, patch: SettingsPatch) -> bool {
        self.apply(|state| state.update_settings(patch))
    }

    pub fn start_game(&self) -> StartOutcome {
        let now = self.clock.now();
        let mut guard = self.lock();
        let inner = &mut *guard;
        let outcome = inner.state.start_game(&mut inner.rng, now);

        match &outcome {
            StartOutcome::Started { advisory } => {
                info!(
                    questions = inner.state.current_session().len(),
                    timer = inner.state.is_timer_running(),
                    "game started"
                );
                if let Some(advisory) = advisory {
                    warn!(%advisory, "session shortened");
                }
                inner.timer.stop();
            }
            StartOutcome::Blocked(advisory) => warn!(%advisory, "game not started"),
            StartOutcome::Ignored => debug!("start_game ignored"),
        }

        self.sync_timer(inner);
        outcome
    }

    pub fn answer_question(&self, option: &str) -> bool {
        self.apply(|state| state.answer_question(option))
    }

    pub fn next_question(&self) -> bool {
        self.apply(QuizState::next_question)
    }

    pub fn prev_question(&self) -> bool {
        self.apply(QuizState::prev_question)
    }

    pub fn go_to_question(&self, index: usize) -> bool {
        self.apply(|state| state.go_to_question(index))
    }

    pub fn toggle_timer(&self) -> bool {
        self.apply(QuizState::toggle_timer)
    }

    pub fn finish_game(&self) -> bool {
        let now = self.clock.now();
        let mut summary = None;
        let applied = self.apply(|state| {
            let finished = state.finish_game(now);
            if finished {
                summary = Some((state.score(), state.elapsed()));
            }
            finished
        });
        if let Some((score, elapsed)) = summary {
            info!(
                correct = score.correct,
                total = score.total,
                %elapsed,
                "game finished"
            );
        }
        applied
    }

    pub fn restart_game(&self) -> bool {
        self.apply(QuizState::restart_game)
    }

    pub fn back_to_subjects(&self) -> bool {
        self.apply(QuizState::back_to_subjects)
    }

    // ─── Internals ────────────────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, action: impl FnOnce(&mut QuizState) -> bool) -> bool {
        let mut guard = self.lock();
        let inner = &mut *guard;
        let applied = action(&mut inner.state);
        if applied {
            debug!(state = %inner.state.game_state(), "action applied");
        }
        self.sync_timer(inner);
        applied
    }

    /// Keep exactly one ticker alive while the clock runs and none otherwise.
    fn sync_timer(&self, inner: &mut Inner) {
        if !inner.state.is_timer_running() {
            inner.timer.stop();
            return;
        }
        if inner.timer.is_active() {
            return;
        }
        let shared = Arc::downgrade(&self.inner);
        inner.timer.start(move |epoch| tick(&shared, epoch));
    }
}

fn tick(shared: &Weak<Mutex<Inner>>, epoch: u64) -> bool {
    let Some(shared) = shared.upgrade() else {
        return false;
    };
    let mut inner = shared.lock().unwrap_or_else(PoisonError::into_inner);
    if inner.timer.epoch() != epoch {
        return false;
    }
    inner.state.tick()
}

impl fmt::Debug for QuizController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("QuizController")
            .field("game_state", &inner.state.game_state())
            .field("bank", &inner.state.selected_bank().map(|bank| &bank.id))
            .field("session_len", &inner.state.current_session().len())
            .field("timer_active", &inner.timer.is_active())
            .finish_non_exhaustive()
    }
}
