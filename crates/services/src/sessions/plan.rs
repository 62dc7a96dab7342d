use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Advisory, Question, QuestionCount, Settings};

use crate::error::SessionError;

/// Questions picked for one play-through.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub questions: Vec<Question>,
    /// Size of the pool the questions were drawn from.
    pub available: usize,
    /// Set when the requested count exceeded the pool.
    pub shortfall: Option<Advisory>,
}

impl SessionPlan {
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }
}

/// Picks session questions from a loaded bank according to the current settings.
pub struct SessionBuilder<'a> {
    questions: &'a [Question],
    settings: &'a Settings,
}

impl<'a> SessionBuilder<'a> {
    #[must_use]
    pub fn new(questions: &'a [Question], settings: &'a Settings) -> Self {
        Self {
            questions,
            settings,
        }
    }

    /// Questions eligible for the session.
    ///
    /// Full mode always uses the entire bank; the topic filter only narrows
    /// capped sessions.
    #[must_use]
    pub fn pool(&self) -> Vec<&'a Question> {
        let full = self.settings.question_count.is_full();
        self.questions
            .iter()
            .filter(|q| full || self.settings.topic.matches(q.topic()))
            .collect()
    }

    /// Build a shuffled plan. The bank itself is never reordered.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestions` when the pool is empty.
    pub fn build<R: Rng + ?Sized>(self, rng: &mut R) -> Result<SessionPlan, SessionError> {
        let mut pool: Vec<Question> = self.pool().into_iter().cloned().collect();
        if pool.is_empty() {
            return Err(SessionError::NoQuestions {
                topic: self.settings.topic.clone(),
            });
        }

        let available = pool.len();
        let (take, shortfall) = match self.settings.question_count {
            QuestionCount::Full => (available, None),
            QuestionCount::Limited(requested) => {
                let requested_len = usize::try_from(requested.get()).unwrap_or(usize::MAX);
                if requested_len > available {
                    let shortfall = Advisory::InsufficientQuestions {
                        requested: requested.get(),
                        available: u32::try_from(available).unwrap_or(u32::MAX),
                    };
                    (available, Some(shortfall))
                } else {
                    (requested_len, None)
                }
            }
        };

        pool.shuffle(rng);
        pool.truncate(take);

        Ok(SessionPlan {
            questions: pool,
            available,
            shortfall,
        })
    }
}
