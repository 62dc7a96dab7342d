#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod sessions;
pub mod source;

pub use quiz_core::Clock;

pub use catalog::BankCatalog;
pub use config::{AppConfig, SourceConfig};
pub use error::{CatalogError, ConfigError, SessionError, SourceError};
pub use source::{FileQuestionSource, HttpQuestionSource, InMemoryQuestionSource, QuestionSource};

pub use sessions::{
    BankMode, LoadTicket, QuizController, QuizSnapshot, QuizState, SessionBuilder, SessionPlan,
    SessionTimer, StartOutcome,
};
