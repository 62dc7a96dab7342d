use quiz_core::model::Verdict;
use services::QuizSnapshot;

use crate::vm::time_fmt::format_datetime;

/// Headline shown above the score, by accuracy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Praise {
    Outstanding,
    GreatJob,
    WellDone,
    KeepLearning,
    GoodEffort,
}

impl Praise {
    #[must_use]
    pub fn for_accuracy(percent: u32) -> Self {
        match percent {
            90.. => Self::Outstanding,
            70..=89 => Self::GreatJob,
            50..=69 => Self::WellDone,
            30..=49 => Self::KeepLearning,
            _ => Self::GoodEffort,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Outstanding => "Outstanding!",
            Self::GreatJob => "Great Job!",
            Self::WellDone => "Well Done!",
            Self::KeepLearning => "Keep Learning!",
            Self::GoodEffort => "Good Effort!",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub number: usize,
    pub question: String,
    pub given: Option<String>,
    pub correct_answer: String,
    pub verdict: Verdict,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub praise: Praise,
    pub correct: usize,
    pub total: usize,
    pub accuracy_percent: u32,
    pub time_taken: String,
    pub finished_at: Option<String>,
    pub review: Vec<ReviewRowVm>,
    pub can_change_subject: bool,
}

impl ResultVm {
    #[must_use]
    pub fn from_snapshot(snapshot: &QuizSnapshot) -> Self {
        let score = snapshot.score();
        let accuracy_percent = score.accuracy_percent();
        let review = snapshot
            .review()
            .into_iter()
            .enumerate()
            .map(|(index, entry)| ReviewRowVm {
                number: index + 1,
                question: entry.question.text().to_owned(),
                given: entry.given.map(str::to_owned),
                correct_answer: entry.question.answer().to_owned(),
                verdict: entry.verdict,
            })
            .collect();

        Self {
            praise: Praise::for_accuracy(accuracy_percent),
            correct: score.correct,
            total: score.total,
            accuracy_percent,
            time_taken: snapshot.elapsed.to_string(),
            finished_at: snapshot.finished_at.map(format_datetime),
            review,
            can_change_subject: snapshot.mode == services::BankMode::Catalog,
        }
    }

    #[must_use]
    pub fn score_label(&self) -> String {
        format!("{} / {}", self.correct, self.total)
    }
}
