mod bank;
mod game;
mod ids;
mod question;
mod score;
mod settings;

pub use bank::{BankConfig, BankError, BankIcon};
pub use game::{Advisory, GameState};
pub use ids::{BankId, QuestionId};
pub use question::{MAX_OPTIONS, Question, QuestionDraft, QuestionError, topic_menu};
pub use score::{ReviewEntry, Score, Verdict, review};
pub use settings::{
    ALL_TOPICS, QuestionCount, Settings, SettingsError, SettingsPatch, TopicFilter,
};
