mod controller;
mod plan;
mod snapshot;
mod state;
mod timer;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::QuizController;
pub use plan::{SessionBuilder, SessionPlan};
pub use snapshot::QuizSnapshot;
pub use state::{BankMode, LoadTicket, QuizState, StartOutcome};
pub use timer::{SessionTimer, TICK_PERIOD};
