use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use quiz_core::model::{BankConfig, Question, QuestionDraft};

use super::{QuestionSource, decode_bank};
use crate::error::SourceError;

#[derive(Debug, Clone)]
enum Stub {
    Body(String),
    Status(StatusCode),
}

/// Canned bank payloads keyed by location. Unknown locations answer 404.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionSource {
    stubs: HashMap<String, Stub>,
    latency: Option<Duration>,
    fetches: Arc<AtomicUsize>,
}

impl InMemoryQuestionSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `drafts` as a JSON array at `location`.
    #[must_use]
    pub fn with_questions(self, location: impl Into<String>, drafts: &[QuestionDraft]) -> Self {
        let body = serde_json::to_string(drafts).unwrap_or_else(|_| "[]".to_owned());
        self.with_body(location, body)
    }

    /// Serve a raw payload at `location`, decoded like a real response.
    #[must_use]
    pub fn with_body(mut self, location: impl Into<String>, body: impl Into<String>) -> Self {
        self.stubs.insert(location.into(), Stub::Body(body.into()));
        self
    }

    /// Answer `location` with a non-success status.
    #[must_use]
    pub fn with_status(mut self, location: impl Into<String>, status: StatusCode) -> Self {
        self.stubs.insert(location.into(), Stub::Status(status));
        self
    }

    /// Delay every fetch, to observe the loading state.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of fetches served so far, shared across clones.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionSource for InMemoryQuestionSource {
    async fn fetch(&self, bank: &BankConfig) -> Result<Vec<Question>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match self.stubs.get(&bank.source) {
            Some(Stub::Body(body)) => decode_bank(body.as_bytes()),
            Some(Stub::Status(status)) => Err(SourceError::HttpStatus(*status)),
            None => Err(SourceError::HttpStatus(StatusCode::NOT_FOUND)),
        }
    }
}
