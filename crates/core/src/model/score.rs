use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::ids::QuestionId;
use crate::model::question::Question;

/// Result of grading a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    /// Count the session questions whose recorded answer matches exactly.
    #[must_use]
    pub fn tally(session: &[Question], answers: &BTreeMap<QuestionId, String>) -> Self {
        let correct = session
            .iter()
            .filter(|q| answers.get(&q.id()).is_some_and(|given| q.is_correct(given)))
            .count();
        Self {
            correct,
            total: session.len(),
        }
    }

    /// `round(100 * correct / total)`, halves rounding up; 0 for an empty session.
    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let pct = (200 * self.correct + self.total) / (2 * self.total);
        u32::try_from(pct).unwrap_or(100)
    }

    #[must_use]
    pub fn incorrect(&self) -> usize {
        self.total.saturating_sub(self.correct)
    }
}

/// How a single question was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    Correct,
    Incorrect,
    Unanswered,
}

/// One row of the post-game review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewEntry<'a> {
    pub question: &'a Question,
    pub given: Option<&'a str>,
    pub verdict: Verdict,
}

/// Per-question review in session order.
#[must_use]
pub fn review<'a>(
    session: &'a [Question],
    answers: &'a BTreeMap<QuestionId, String>,
) -> Vec<ReviewEntry<'a>> {
    session
        .iter()
        .map(|question| {
            let given = answers.get(&question.id()).map(String::as_str);
            let verdict = match given {
                None => Verdict::Unanswered,
                Some(answer) if question.is_correct(answer) => Verdict::Correct,
                Some(_) => Verdict::Incorrect,
            };
            ReviewEntry {
                question,
                given,
                verdict,
            }
        })
        .collect()
}
