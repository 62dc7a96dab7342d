use thiserror::Error;

use crate::model::{BankError, QuestionError, SettingsError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionCount, QuestionDraft, QuestionId};

    fn validate_count(raw: &str) -> Result<QuestionCount, Error> {
        Ok(raw.parse()?)
    }

    #[test]
    fn domain_errors_convert_transparently() {
        let err = validate_count("zero").unwrap_err();
        assert!(matches!(err, Error::Settings(_)));

        let draft = QuestionDraft {
            id: QuestionId::new(1),
            topic: String::new(),
            question: "  ".into(),
            options: vec!["a".into()],
            answer: "a".into(),
        };
        let err = Error::from(draft.validate().unwrap_err());
        assert_eq!(err.to_string(), QuestionError::EmptyText.to_string());
    }
}
