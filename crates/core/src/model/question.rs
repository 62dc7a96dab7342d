use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::settings::ALL_TOPICS;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question has no options")]
    NoOptions,

    #[error("answer {answer:?} is not one of the options")]
    AnswerNotInOptions { answer: String },

    #[error("question has {count} options, at most {} are supported", MAX_OPTIONS)]
    TooManyOptions { count: usize },
}

/// Options are labelled `A` to `Z`.
pub const MAX_OPTIONS: usize = 26;

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Raw question as it appears in a bank file.
///
/// Field names match the JSON payload: `{id, topic, question, options, answer}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub id: QuestionId,
    #[serde(default)]
    pub topic: String,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl QuestionDraft {
    /// Validate the raw record into an immutable `Question`.
    ///
    /// The topic is trimmed; an empty topic is allowed and simply never shows
    /// up in the topic list.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the text is blank, there are no options, or
    /// the answer does not match any option exactly.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.question.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        if self.options.len() > MAX_OPTIONS {
            return Err(QuestionError::TooManyOptions {
                count: self.options.len(),
            });
        }
        if !self.options.iter().any(|opt| *opt == self.answer) {
            return Err(QuestionError::AnswerNotInOptions {
                answer: self.answer,
            });
        }

        Ok(Question {
            id: self.id,
            topic: self.topic.trim().to_owned(),
            question: self.question,
            options: self.options,
            answer: self.answer,
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question. Option order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    topic: String,
    question: String,
    options: Vec<String>,
    answer: String,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|opt| opt == option)
    }

    /// Exact string comparison against the keyed answer.
    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.answer == option
    }
}

/// Topic menu for a bank: `"All"` first, then every distinct non-empty topic sorted.
///
/// A topic literally named `"All"` is folded into the catch-all entry.
#[must_use]
pub fn topic_menu(questions: &[Question]) -> Vec<String> {
    let distinct: BTreeSet<&str> = questions
        .iter()
        .map(Question::topic)
        .filter(|topic| !topic.is_empty() && *topic != ALL_TOPICS)
        .collect();

    std::iter::once(ALL_TOPICS)
        .chain(distinct)
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft {
            id: QuestionId::new(1),
            topic: " HTTP ".into(),
            question: "Which port does HTTPS use by default?".into(),
            options: vec!["80".into(), "443".into(), "8080".into()],
            answer: "443".into(),
        }
    }

    #[test]
    fn validate_keeps_option_order_and_trims_topic() {
        let q = draft().validate().unwrap();
        assert_eq!(q.topic(), "HTTP");
        assert_eq!(q.options(), ["80", "443", "8080"]);
        assert!(q.is_correct("443"));
        assert!(!q.is_correct(" 443"));
    }

    #[test]
    fn answer_must_match_an_option() {
        let mut d = draft();
        d.answer = "22".into();
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::AnswerNotInOptions { answer: "22".into() }
        );
    }

    #[test]
    fn blank_text_and_missing_options_are_rejected() {
        let mut d = draft();
        d.question = "   ".into();
        assert_eq!(d.validate().unwrap_err(), QuestionError::EmptyText);

        let mut d = draft();
        d.options.clear();
        assert_eq!(d.validate().unwrap_err(), QuestionError::NoOptions);
    }

    #[test]
    fn topic_menu_is_all_then_sorted_distinct() {
        let make = |id, topic: &str| {
            QuestionDraft {
                id: QuestionId::new(id),
                topic: topic.into(),
                question: "Q".into(),
                options: vec!["A".into()],
                answer: "A".into(),
            }
            .validate()
            .unwrap()
        };
        let questions = vec![make(1, "HTTP"), make(2, ""), make(3, "CSS"), make(4, "HTTP")];
        assert_eq!(topic_menu(&questions), ["All", "CSS", "HTTP"]);
        assert_eq!(topic_menu(&[]), ["All"]);

        let clashing = vec![make(1, "All"), make(2, "Other"), make(3, "Other")];
        assert_eq!(topic_menu(&clashing), ["All", "Other"]);
    }

    #[test]
    fn more_options_than_letters_are_rejected() {
        let mut d = draft();
        d.options = (0..=MAX_OPTIONS).map(|n| format!("option {n}")).collect();
        d.answer = "option 0".into();
        assert_eq!(
            d.clone().validate().unwrap_err(),
            QuestionError::TooManyOptions { count: 27 }
        );

        d.options.pop();
        assert!(d.validate().is_ok());
    }

    #[test]
    fn draft_deserializes_without_topic() {
        let d: QuestionDraft = serde_json::from_str(
            r#"{"id": 3, "question": "Q?", "options": ["A", "B"], "answer": "B"}"#,
        )
        .unwrap();
        let q = d.validate().unwrap();
        assert_eq!(q.topic(), "");
        assert_eq!(q.id(), QuestionId::new(3));
    }
}
