//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use quiz_core::model::{BankError, BankId, QuestionError, QuestionId, TopicFilter};

/// Errors emitted while fetching or decoding a question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("failed to load questions: {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("failed to load questions: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid source location {location:?}")]
    InvalidLocation { location: String },
    #[error("the question file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("the question file is empty or invalid")]
    NotAnArray,
    #[error("the question file is empty")]
    Empty,
    #[error("question #{index} is malformed: {message}")]
    Malformed { index: usize, message: String },
    #[error("question #{index} is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
    #[error("question id {0} appears more than once")]
    DuplicateId(QuestionId),
}

/// Errors emitted while building a session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions found for topic {topic}")]
    NoQuestions { topic: TopicFilter },
}

/// Errors emitted by `BankCatalog`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog has no banks")]
    Empty,
    #[error("bank {0} is listed more than once")]
    DuplicateBank(BankId),
    #[error("unknown bank {0}")]
    UnknownBank(BankId),
    #[error(transparent)]
    Bank(#[from] BankError),
}

/// Errors emitted while loading application configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
    #[error("invalid source URL {raw:?}")]
    InvalidUrl { raw: String },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
