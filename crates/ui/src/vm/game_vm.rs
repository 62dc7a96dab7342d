use quiz_core::model::Question;
use services::QuizSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavStatus {
    Current,
    Answered,
    Unanswered,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    /// `A`, `B`, ... in display order.
    pub letter: char,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavCellVm {
    pub number: usize,
    pub status: NavStatus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameVm {
    pub position: usize,
    pub total: usize,
    pub progress_percent: u32,
    pub topic: String,
    pub question: String,
    pub options: Vec<OptionVm>,
    pub navigator: Vec<NavCellVm>,
    pub answered: usize,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub timer_enabled: bool,
    pub paused: bool,
    pub clock: String,
    pub advisory: Option<String>,
}

impl GameVm {
    /// `None` outside of a game.
    #[must_use]
    pub fn from_snapshot(snapshot: &QuizSnapshot) -> Option<Self> {
        let question = snapshot.current_question()?;
        let total = snapshot.current_session.len();
        let paused = snapshot.is_paused();
        let given = snapshot.answer_for(question.id());

        Some(Self {
            position: snapshot.current_index + 1,
            total,
            progress_percent: progress_percent(snapshot.current_index, total),
            topic: question.topic().to_owned(),
            question: question.text().to_owned(),
            options: option_rows(question, given),
            navigator: navigator(snapshot),
            answered: snapshot.answered_count(),
            can_go_previous: snapshot.can_go_previous() && !paused,
            can_go_next: snapshot.can_go_next() && !paused,
            timer_enabled: snapshot.settings.timer_enabled,
            paused,
            clock: snapshot.elapsed.to_string(),
            advisory: snapshot.advisory.as_ref().map(ToString::to_string),
        })
    }

    #[must_use]
    pub fn position_label(&self) -> String {
        format!("Question {} / {}", self.position, self.total)
    }

    /// Map an option letter typed by the user back to the option text.
    #[must_use]
    pub fn option_for_letter(&self, letter: char) -> Option<&str> {
        let letter = letter.to_ascii_uppercase();
        self.options
            .iter()
            .find(|option| option.letter == letter)
            .map(|option| option.text.as_str())
    }
}

fn progress_percent(index: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    u32::try_from((index + 1) * 100 / total).unwrap_or(100)
}

fn option_rows(question: &Question, given: Option<&str>) -> Vec<OptionVm> {
    ('A'..='Z')
        .zip(question.options())
        .map(|(letter, text)| OptionVm {
            letter,
            text: text.clone(),
            selected: given == Some(text.as_str()),
        })
        .collect()
}

fn navigator(snapshot: &QuizSnapshot) -> Vec<NavCellVm> {
    snapshot
        .current_session
        .iter()
        .enumerate()
        .map(|(index, question)| NavCellVm {
            number: index + 1,
            status: if index == snapshot.current_index {
                NavStatus::Current
            } else if snapshot.answer_for(question.id()).is_some() {
                NavStatus::Answered
            } else {
                NavStatus::Unanswered
            },
        })
        .collect()
}
