use quiz_core::model::{QuestionCount, TopicFilter};
use services::QuizSnapshot;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicChoiceVm {
    pub label: String,
    pub filter: TopicFilter,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountChoiceVm {
    pub label: String,
    pub count: QuestionCount,
    pub selected: bool,
}

/// Session configuration screen shown once a bank is loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuVm {
    pub bank_name: String,
    pub question_total: usize,
    pub topics: Vec<TopicChoiceVm>,
    pub counts: Vec<CountChoiceVm>,
    pub timer_enabled: bool,
    /// Set when the last start attempt was refused.
    pub advisory: Option<String>,
    pub can_change_subject: bool,
}

impl MenuVm {
    #[must_use]
    pub fn from_snapshot(snapshot: &QuizSnapshot) -> Self {
        let settings = &snapshot.settings;
        let topics = snapshot
            .topics
            .iter()
            .map(|label| {
                let filter = TopicFilter::from(label.clone());
                TopicChoiceVm {
                    label: label.clone(),
                    selected: filter == settings.topic,
                    filter,
                }
            })
            .collect();

        Self {
            bank_name: snapshot
                .selected_bank
                .as_ref()
                .map(|bank| bank.name.clone())
                .unwrap_or_default(),
            question_total: snapshot.questions.len(),
            topics,
            counts: count_choices(settings.question_count),
            timer_enabled: settings.timer_enabled,
            advisory: snapshot
                .advisory
                .as_ref()
                .filter(|advisory| advisory.is_blocking())
                .map(ToString::to_string),
            can_change_subject: snapshot.mode == services::BankMode::Catalog,
        }
    }
}

/// The preset counts followed by the whole bank.
#[must_use]
pub fn count_choices(selected: QuestionCount) -> Vec<CountChoiceVm> {
    QuestionCount::PRESETS
        .iter()
        .filter_map(|&n| QuestionCount::limited(n))
        .chain(std::iter::once(QuestionCount::Full))
        .map(|count| CountChoiceVm {
            label: match count {
                QuestionCount::Limited(n) => n.to_string(),
                QuestionCount::Full => "ALL".to_owned(),
            },
            selected: count == selected,
            count,
        })
        .collect()
}
