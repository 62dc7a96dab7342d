use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use quiz_core::model::{BankConfig, Question};

use super::{QuestionSource, decode_bank};
use crate::error::SourceError;

/// Reads banks from a directory on disk.
#[derive(Clone, Debug)]
pub struct FileQuestionSource {
    root: PathBuf,
}

impl FileQuestionSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Locations are always relative to the root; a leading `/` is ignored.
    #[must_use]
    pub fn resolve(&self, location: &str) -> PathBuf {
        self.root.join(location.trim_start_matches('/'))
    }
}

#[async_trait]
impl QuestionSource for FileQuestionSource {
    async fn fetch(&self, bank: &BankConfig) -> Result<Vec<Question>, SourceError> {
        let path = self.resolve(&bank.source);
        debug!(bank = %bank.id, path = %path.display(), "reading question bank");

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| SourceError::Io { path, source })?;
        decode_bank(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(source: &str) -> BankConfig {
        BankConfig::new("t", "Test", source)
    }

    #[tokio::test]
    async fn reads_bank_from_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("t.json"),
            r#"[{"id": 1, "topic": "T", "question": "Q", "options": ["A", "B"], "answer": "A"}]"#,
        )
        .unwrap();

        let source = FileQuestionSource::new(dir.path());
        let questions = source.fetch(&bank("/t.json")).await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].topic(), "T");
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileQuestionSource::new(dir.path());
        let err = source.fetch(&bank("missing.json")).await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}
