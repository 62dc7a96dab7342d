use std::fmt;

use quiz_core::model::{BankId, QuestionCount, TopicFilter};
use ui::Screen;
use ui::vm::GameVm;

/// One line of user input, resolved against the screen it was typed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Quit,
    SelectBank(BankId),
    Topic(TopicFilter),
    Count(QuestionCount),
    SetTimer(bool),
    Start,
    Answer(String),
    Next,
    Prev,
    GoTo(usize),
    Pause,
    Submit,
    Restart,
    Back,
    Retry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    OutOfRange { what: &'static str, raw: String },
    MissingValue { command: &'static str },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Unknown(raw) => write!(f, "unknown command: {raw}"),
            CommandError::OutOfRange { what, raw } => write!(f, "no {what} {raw}"),
            CommandError::MissingValue { command } => write!(f, "{command} requires a value"),
        }
    }
}

impl std::error::Error for CommandError {}

impl Command {
    /// # Errors
    ///
    /// Returns `CommandError` for input that means nothing on `screen`.
    pub fn parse(input: &str, screen: &Screen) -> Result<Self, CommandError> {
        let input = input.trim();
        let mut words = input.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Self::Refresh);
        };
        let head = head.to_ascii_lowercase();
        let arg = words.next();

        if matches!(head.as_str(), "quit" | "q" | "exit") {
            return Ok(Self::Quit);
        }

        match screen {
            Screen::Subjects(cards) => {
                let index = one_based(&head, cards.len(), "subject")?;
                Ok(Self::SelectBank(cards[index].id.clone()))
            }
            Screen::Menu(menu) => match head.as_str() {
                "topic" => {
                    let raw = arg.ok_or(CommandError::MissingValue { command: "topic" })?;
                    let index = one_based(raw, menu.topics.len(), "topic")?;
                    Ok(Self::Topic(menu.topics[index].filter.clone()))
                }
                "count" => {
                    let raw = arg.ok_or(CommandError::MissingValue { command: "count" })?;
                    parse_count(raw).map(Self::Count)
                }
                "timer" => Ok(Self::SetTimer(!menu.timer_enabled)),
                "start" | "s" => Ok(Self::Start),
                "back" | "b" => Ok(Self::Back),
                "restart" => Ok(Self::Restart),
                _ => Err(CommandError::Unknown(input.to_owned())),
            },
            // Command words win over bare option letters; `answer <letter>`
            // reaches every option.
            Screen::Game(game) => match head.as_str() {
                "next" | "n" => Ok(Self::Next),
                "prev" | "p" => Ok(Self::Prev),
                "go" => {
                    let raw = arg.ok_or(CommandError::MissingValue { command: "go" })?;
                    one_based(raw, game.total, "question").map(Self::GoTo)
                }
                "pause" | "resume" => Ok(Self::Pause),
                "submit" => Ok(Self::Submit),
                "restart" => Ok(Self::Restart),
                "answer" | "a" if arg.is_some() => {
                    let raw = arg.unwrap_or_default();
                    option_letter(game, raw)
                        .map(Self::Answer)
                        .ok_or_else(|| CommandError::OutOfRange {
                            what: "option",
                            raw: raw.to_owned(),
                        })
                }
                _ => option_letter(game, &head)
                    .map(Self::Answer)
                    .ok_or_else(|| CommandError::Unknown(input.to_owned())),
            },
            Screen::Result(_) => match head.as_str() {
                "restart" | "r" => Ok(Self::Restart),
                "back" | "b" => Ok(Self::Back),
                _ => Err(CommandError::Unknown(input.to_owned())),
            },
            Screen::Error { .. } => match head.as_str() {
                "retry" | "r" => Ok(Self::Retry),
                "back" | "b" => Ok(Self::Back),
                _ => Err(CommandError::Unknown(input.to_owned())),
            },
            Screen::Loading { .. } => Err(CommandError::Unknown(input.to_owned())),
        }
    }
}

/// The option behind a single typed letter.
fn option_letter(game: &GameVm, raw: &str) -> Option<String> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => game.option_for_letter(letter).map(str::to_owned),
        _ => None,
    }
}

/// Parse a 1-based list position into an index below `len`.
fn one_based(raw: &str, len: usize, what: &'static str) -> Result<usize, CommandError> {
    raw.parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
        .ok_or_else(|| CommandError::OutOfRange {
            what,
            raw: raw.to_owned(),
        })
}

fn parse_count(raw: &str) -> Result<QuestionCount, CommandError> {
    if raw.eq_ignore_ascii_case("all") {
        return Ok(QuestionCount::Full);
    }
    raw.parse().map_err(|_| CommandError::OutOfRange {
        what: "question count",
        raw: raw.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Settings;
    use services::{BankCatalog, QuizState};
    use ui::vm::OptionVm;

    fn subjects() -> Screen {
        Screen::from_snapshot(
            &QuizState::with_catalog(Settings::default()).snapshot(),
            &BankCatalog::builtin(),
        )
    }

    #[test]
    fn blank_line_refreshes_and_quit_works_anywhere() {
        let screen = subjects();
        assert_eq!(Command::parse("   ", &screen), Ok(Command::Refresh));
        assert_eq!(Command::parse("Quit", &screen), Ok(Command::Quit));
    }

    #[test]
    fn subject_numbers_are_one_based() {
        let screen = subjects();
        assert_eq!(
            Command::parse("2", &screen),
            Ok(Command::SelectBank(BankId::new("oops")))
        );
        assert!(matches!(
            Command::parse("4", &screen),
            Err(CommandError::OutOfRange { .. })
        ));
        assert!(matches!(
            Command::parse("0", &screen),
            Err(CommandError::OutOfRange { .. })
        ));
    }

    fn game_with_options(count: u8) -> Screen {
        let options = (b'A'..b'A' + count)
            .map(|letter| OptionVm {
                letter: char::from(letter),
                text: format!("choice {}", char::from(letter)),
                selected: false,
            })
            .collect();
        Screen::Game(GameVm {
            position: 1,
            total: 3,
            progress_percent: 33,
            topic: String::new(),
            question: "Pick one".into(),
            options,
            navigator: Vec::new(),
            answered: 0,
            can_go_previous: false,
            can_go_next: true,
            timer_enabled: false,
            paused: false,
            clock: "0:00".into(),
            advisory: None,
        })
    }

    #[test]
    fn navigation_words_win_over_option_letters() {
        let screen = game_with_options(17);
        assert_eq!(Command::parse("n", &screen), Ok(Command::Next));
        assert_eq!(Command::parse("p", &screen), Ok(Command::Prev));
        assert_eq!(Command::parse("q", &screen), Ok(Command::Quit));
        assert_eq!(
            Command::parse("answer n", &screen),
            Ok(Command::Answer("choice N".into()))
        );
        assert_eq!(
            Command::parse("a Q", &screen),
            Ok(Command::Answer("choice Q".into()))
        );
        assert_eq!(
            Command::parse("b", &screen),
            Ok(Command::Answer("choice B".into()))
        );
        assert_eq!(Command::parse("a", &screen), Ok(Command::Answer("choice A".into())));
        assert!(matches!(
            Command::parse("answer z", &screen),
            Err(CommandError::OutOfRange { .. })
        ));
    }

    #[test]
    fn loading_screen_only_accepts_quit() {
        let screen = Screen::Loading {
            bank_name: "Web".into(),
        };
        assert!(Command::parse("1", &screen).is_err());
        assert_eq!(Command::parse("quit", &screen), Ok(Command::Quit));
    }

    #[test]
    fn count_accepts_presets_and_all() {
        assert_eq!(parse_count("ALL"), Ok(QuestionCount::Full));
        assert_eq!(parse_count("full"), Ok(QuestionCount::Full));
        assert_eq!(parse_count("15"), Ok(QuestionCount::limited(15).unwrap()));
        assert!(parse_count("0").is_err());
    }
}
