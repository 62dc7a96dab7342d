//! Plain-text rendering of screen view models, one `String` per line.

use quiz_core::model::{BankIcon, Verdict};

use crate::vm::{GameVm, MenuVm, NavStatus, ResultVm, Screen, SubjectCardVm};

#[must_use]
pub fn render(screen: &Screen) -> String {
    render_lines(screen).join("\n")
}

#[must_use]
pub fn render_lines(screen: &Screen) -> Vec<String> {
    match screen {
        Screen::Subjects(cards) => subjects(cards),
        Screen::Loading { bank_name } => vec![format!("Loading {bank_name}...")],
        Screen::Menu(menu) => menu_lines(menu),
        Screen::Game(game) => game_lines(game),
        Screen::Result(result) => result_lines(result),
        Screen::Error {
            message,
            can_change_subject,
        } => {
            let mut lines = vec![format!("Error: {message}"), String::new()];
            lines.push(if *can_change_subject {
                "[retry] try again   [back] change subject   [quit]".to_owned()
            } else {
                "[retry] try again   [quit]".to_owned()
            });
            lines
        }
    }
}

fn icon_glyph(icon: BankIcon) -> &'static str {
    match icon {
        BankIcon::Globe => "(web)",
        BankIcon::Coffee => "(java)",
        BankIcon::Cpu => "(cpu)",
    }
}

fn subjects(cards: &[SubjectCardVm]) -> Vec<String> {
    let mut lines = vec!["Choose a subject".to_owned(), String::new()];
    for (index, card) in cards.iter().enumerate() {
        lines.push(format!("  {}. {} {}", index + 1, card.name, icon_glyph(card.icon)));
        if !card.description.is_empty() {
            lines.push(format!("     {}", card.description));
        }
    }
    lines.push(String::new());
    lines.push("[<number>] open subject   [quit]".to_owned());
    lines
}

fn mark(selected: bool) -> char {
    if selected { '*' } else { ' ' }
}

fn menu_lines(menu: &MenuVm) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({} questions)", menu.bank_name, menu.question_total),
        "Configure your session".to_owned(),
        String::new(),
        "Topic:".to_owned(),
    ];
    for (index, topic) in menu.topics.iter().enumerate() {
        lines.push(format!("  {}{}. {}", mark(topic.selected), index + 1, topic.label));
    }

    let counts = menu
        .counts
        .iter()
        .map(|choice| {
            if choice.selected {
                format!("[{}]", choice.label)
            } else {
                format!(" {} ", choice.label)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    lines.push(format!("Questions: {counts}"));
    lines.push(format!(
        "Timer: {}",
        if menu.timer_enabled { "on" } else { "off" }
    ));

    if let Some(advisory) = &menu.advisory {
        lines.push(String::new());
        lines.push(format!("! {advisory}"));
    }

    lines.push(String::new());
    let mut help = "[topic <n>] [count <5|10|15|20|all>] [timer] [start]".to_owned();
    if menu.can_change_subject {
        help.push_str(" [back]");
    }
    help.push_str(" [quit]");
    lines.push(help);
    lines
}

fn game_lines(game: &GameVm) -> Vec<String> {
    let mut header = format!("{}   {}%", game.position_label(), game.progress_percent);
    if game.timer_enabled {
        header.push_str(&format!("   {}", game.clock));
    }
    let mut lines = vec![header];

    if let Some(advisory) = &game.advisory {
        lines.push(format!("! {advisory}"));
    }
    if game.paused {
        lines.push(String::new());
        lines.push("Quiz Paused. Take a break and resume when ready. [pause] resume".to_owned());
        return lines;
    }

    lines.push(String::new());
    if !game.topic.is_empty() {
        lines.push(format!("[{}]", game.topic));
    }
    lines.push(game.question.clone());
    for option in &game.options {
        lines.push(format!("  {} {}) {}", mark(option.selected), option.letter, option.text));
    }

    let navigator = game
        .navigator
        .iter()
        .map(|cell| match cell.status {
            NavStatus::Current => format!("[{}]", cell.number),
            NavStatus::Answered => format!("{}*", cell.number),
            NavStatus::Unanswered => cell.number.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    lines.push(String::new());
    lines.push(format!("Navigator ({}/{} answered): {navigator}", game.answered, game.total));

    let mut help = vec!["[<letter> | answer <letter>]"];
    if game.can_go_previous {
        help.push("[p] previous");
    }
    if game.can_go_next {
        help.push("[n] next");
    }
    help.push("[go <n>]");
    if game.timer_enabled {
        help.push("[pause]");
    }
    help.extend(["[submit]", "[restart]", "[quit]"]);
    lines.push(help.join(" "));
    lines
}

fn result_lines(result: &ResultVm) -> Vec<String> {
    let mut lines = vec![
        result.praise.label().to_owned(),
        "You completed the quiz!".to_owned(),
        String::new(),
        format!(
            "Score: {}   Accuracy: {}%   Time Taken: {}",
            result.score_label(),
            result.accuracy_percent,
            result.time_taken
        ),
    ];
    if let Some(finished_at) = &result.finished_at {
        lines.push(format!("Finished {finished_at}"));
    }

    lines.push(String::new());
    for row in &result.review {
        let status = match row.verdict {
            Verdict::Correct => "correct",
            Verdict::Incorrect => "wrong",
            Verdict::Unanswered => "unanswered",
        };
        lines.push(format!("{:>3}. {} ({status})", row.number, row.question));
        match (&row.given, row.verdict) {
            (Some(given), Verdict::Incorrect) => {
                lines.push(format!("     your answer: {given}"));
                lines.push(format!("     correct answer: {}", row.correct_answer));
            }
            (_, Verdict::Unanswered) => {
                lines.push(format!("     correct answer: {}", row.correct_answer));
            }
            _ => {}
        }
    }

    lines.push(String::new());
    lines.push(if result.can_change_subject {
        "[restart] try again   [back] change subject   [quit]".to_owned()
    } else {
        "[restart] try again   [quit]".to_owned()
    });
    lines
}
