//! Question sources: where bank payloads come from and how they are decoded.

mod file;
mod http;
mod memory;

use std::collections::HashSet;

use async_trait::async_trait;
use quiz_core::model::{BankConfig, Question, QuestionDraft};

use crate::error::SourceError;

pub use file::FileQuestionSource;
pub use http::HttpQuestionSource;
pub use memory::InMemoryQuestionSource;

/// Read-only access to question banks.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch and decode every question of `bank`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` for transport failures and for empty or malformed payloads.
    async fn fetch(&self, bank: &BankConfig) -> Result<Vec<Question>, SourceError>;
}

/// Decode a bank payload: a non-empty JSON array of question records.
///
/// # Errors
///
/// Returns `SourceError::Json` for unparsable bytes, `NotAnArray`/`Empty` for the
/// wrong shape, and `Malformed`/`InvalidQuestion`/`DuplicateId` for bad entries.
pub fn decode_bank(bytes: &[u8]) -> Result<Vec<Question>, SourceError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    let serde_json::Value::Array(items) = value else {
        return Err(SourceError::NotAnArray);
    };
    if items.is_empty() {
        return Err(SourceError::Empty);
    }

    let mut seen = HashSet::with_capacity(items.len());
    let mut questions = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let draft: QuestionDraft =
            serde_json::from_value(item).map_err(|e| SourceError::Malformed {
                index,
                message: e.to_string(),
            })?;
        let question = draft
            .validate()
            .map_err(|source| SourceError::InvalidQuestion { index, source })?;
        if !seen.insert(question.id()) {
            return Err(SourceError::DuplicateId(question.id()));
        }
        questions.push(question);
    }
    Ok(questions)
}
