use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("question count must be a positive number or \"full\", got {raw:?}")]
    InvalidQuestionCount { raw: String },
}

//
// ─── TOPIC FILTER ──────────────────────────────────────────────────────────────
//

/// Label of the catch-all topic entry.
pub const ALL_TOPICS: &str = "All";

/// Which topic a session draws its questions from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TopicFilter {
    #[default]
    All,
    Only(String),
}

impl TopicFilter {
    #[must_use]
    pub fn only(topic: impl Into<String>) -> Self {
        Self::from(topic.into())
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    #[must_use]
    pub fn matches(&self, topic: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == topic,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_TOPICS,
            Self::Only(topic) => topic,
        }
    }
}

impl From<String> for TopicFilter {
    fn from(value: String) -> Self {
        if value == ALL_TOPICS {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<TopicFilter> for String {
    fn from(value: TopicFilter) -> Self {
        match value {
            TopicFilter::All => ALL_TOPICS.to_owned(),
            TopicFilter::Only(topic) => topic,
        }
    }
}

impl fmt::Display for TopicFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── QUESTION COUNT ────────────────────────────────────────────────────────────
//

/// Session length: a capped number of questions or the whole bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawQuestionCount", into = "RawQuestionCount")]
pub enum QuestionCount {
    Limited(NonZeroU32),
    Full,
}

impl QuestionCount {
    /// Count presets offered on the menu screen.
    pub const PRESETS: [u32; 4] = [5, 10, 15, 20];

    /// `None` when `count` is zero.
    #[must_use]
    pub fn limited(count: u32) -> Option<Self> {
        NonZeroU32::new(count).map(Self::Limited)
    }

    #[must_use]
    pub fn is_full(self) -> bool {
        matches!(self, Self::Full)
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self::Limited(NonZeroU32::new(10).unwrap_or(NonZeroU32::MIN))
    }
}

impl FromStr for QuestionCount {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("full") {
            return Ok(Self::Full);
        }
        trimmed
            .parse::<u32>()
            .ok()
            .and_then(Self::limited)
            .ok_or_else(|| SettingsError::InvalidQuestionCount { raw: s.to_owned() })
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(n) => write!(f, "{n}"),
            Self::Full => f.write_str("full"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawQuestionCount {
    Count(u32),
    Word(String),
}

impl TryFrom<RawQuestionCount> for QuestionCount {
    type Error = SettingsError;

    fn try_from(value: RawQuestionCount) -> Result<Self, Self::Error> {
        match value {
            RawQuestionCount::Count(n) => {
                Self::limited(n).ok_or_else(|| SettingsError::InvalidQuestionCount {
                    raw: n.to_string(),
                })
            }
            RawQuestionCount::Word(word) => word.parse(),
        }
    }
}

impl From<QuestionCount> for RawQuestionCount {
    fn from(value: QuestionCount) -> Self {
        match value {
            QuestionCount::Limited(n) => Self::Count(n.get()),
            QuestionCount::Full => Self::Word("full".into()),
        }
    }
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// User configuration for the next session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub topic: TopicFilter,
    pub question_count: QuestionCount,
    pub timer_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            topic: TopicFilter::All,
            question_count: QuestionCount::default(),
            timer_enabled: true,
        }
    }
}

impl Settings {
    /// Merge a partial update; unset fields keep their current value.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(topic) = patch.topic {
            self.topic = topic;
        }
        if let Some(count) = patch.question_count {
            self.question_count = count;
        }
        if let Some(enabled) = patch.timer_enabled {
            self.timer_enabled = enabled;
        }
    }
}

/// Partial settings update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub topic: Option<TopicFilter>,
    pub question_count: Option<QuestionCount>,
    pub timer_enabled: Option<bool>,
}

impl SettingsPatch {
    #[must_use]
    pub fn topic(topic: TopicFilter) -> Self {
        Self {
            topic: Some(topic),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn question_count(count: QuestionCount) -> Self {
        Self {
            question_count: Some(count),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn timer_enabled(enabled: bool) -> Self {
        Self {
            timer_enabled: Some(enabled),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topic.is_none() && self.question_count.is_none() && self.timer_enabled.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_menu_defaults() {
        let settings = Settings::default();
        assert!(settings.topic.is_all());
        assert_eq!(settings.question_count, QuestionCount::limited(10).unwrap());
        assert!(settings.timer_enabled);
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut settings = Settings::default();
        settings.apply(SettingsPatch::topic(TopicFilter::only("CSS")));
        settings.apply(SettingsPatch::question_count(QuestionCount::Full));

        assert_eq!(settings.topic, TopicFilter::Only("CSS".into()));
        assert!(settings.question_count.is_full());
        assert!(settings.timer_enabled);
        assert!(SettingsPatch::default().is_empty());
    }

    #[test]
    fn question_count_parses_full_and_positive_numbers() {
        assert_eq!("full".parse::<QuestionCount>().unwrap(), QuestionCount::Full);
        assert_eq!("FULL".parse::<QuestionCount>().unwrap(), QuestionCount::Full);
        assert_eq!(
            " 15 ".parse::<QuestionCount>().unwrap(),
            QuestionCount::limited(15).unwrap()
        );
        assert!("0".parse::<QuestionCount>().is_err());
        assert!("ten".parse::<QuestionCount>().is_err());
    }

    #[test]
    fn question_count_serde_accepts_number_or_word() {
        let n: QuestionCount = serde_json::from_str("20").unwrap();
        assert_eq!(n, QuestionCount::limited(20).unwrap());
        let full: QuestionCount = serde_json::from_str("\"full\"").unwrap();
        assert_eq!(full, QuestionCount::Full);
        assert!(serde_json::from_str::<QuestionCount>("0").is_err());
        assert_eq!(serde_json::to_string(&QuestionCount::Full).unwrap(), "\"full\"");
    }

    #[test]
    fn topic_filter_round_trips_through_its_label() {
        assert_eq!(TopicFilter::from("All".to_owned()), TopicFilter::All);
        assert_eq!(TopicFilter::only("CSS").label(), "CSS");
        assert!(TopicFilter::All.matches("anything"));
        assert!(!TopicFilter::only("CSS").matches("HTML"));
    }
}
