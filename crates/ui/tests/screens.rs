use rand::SeedableRng;
use rand::rngs::StdRng;

use quiz_core::model::{
    BankConfig, GameState, Question, QuestionCount, QuestionDraft, QuestionId, Settings,
    SettingsPatch, TopicFilter, Verdict,
};
use quiz_core::time::fixed_now;
use services::{BankCatalog, QuizState};
use ui::vm::{NavStatus, Praise};
use ui::{Screen, render};

fn question(id: u64, topic: &str) -> Question {
    QuestionDraft {
        id: QuestionId::new(id),
        topic: topic.to_owned(),
        question: format!("Question {id}?"),
        options: vec!["yes".into(), "no".into(), "maybe".into()],
        answer: "yes".into(),
    }
    .validate()
    .unwrap()
}

fn bank() -> BankConfig {
    BankConfig::new("web", "Web Technology", "web.json")
}

fn loaded_state() -> QuizState {
    let mut state = QuizState::with_catalog(Settings::default());
    let ticket = state.select_bank(bank()).unwrap();
    let questions = (1..=4)
        .map(|id| question(id, if id % 2 == 0 { "CSS" } else { "HTML" }))
        .collect();
    assert!(state.complete_load(&ticket, Ok(questions)));
    state
}

fn screen(state: &QuizState) -> Screen {
    Screen::from_snapshot(&state.snapshot(), &BankCatalog::builtin())
}

#[test]
fn subject_selection_lists_the_catalog() {
    let state = QuizState::with_catalog(Settings::default());
    let Screen::Subjects(cards) = screen(&state) else {
        panic!("expected subject list");
    };
    assert_eq!(cards.len(), 3);
    assert!(render(&screen(&state)).contains("1. Web Technology"));
}

#[test]
fn menu_marks_current_choices() {
    let mut state = loaded_state();
    state.update_settings(SettingsPatch::topic(TopicFilter::only("CSS")));
    state.update_settings(SettingsPatch::question_count(QuestionCount::Full));

    let Screen::Menu(menu) = screen(&state) else {
        panic!("expected menu");
    };
    assert_eq!(menu.bank_name, "Web Technology");
    let labels: Vec<_> = menu.topics.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, ["All", "CSS", "HTML"]);
    assert!(menu.topics[1].selected);
    let counts: Vec<_> = menu.counts.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(counts, ["5", "10", "15", "20", "ALL"]);
    assert!(menu.counts[4].selected);
    assert!(menu.can_change_subject);
}

#[test]
fn blocked_start_shows_the_advisory_on_the_menu() {
    let mut state = loaded_state();
    state.update_settings(SettingsPatch::topic(TopicFilter::only("SQL")));
    state.start_game(&mut StdRng::seed_from_u64(1), fixed_now());

    let Screen::Menu(menu) = screen(&state) else {
        panic!("expected menu");
    };
    assert_eq!(
        menu.advisory.as_deref(),
        Some("No questions found for topic \"SQL\".")
    );
}

#[test]
fn game_screen_tracks_position_and_answers() {
    let mut state = loaded_state();
    state.start_game(&mut StdRng::seed_from_u64(3), fixed_now());
    assert!(state.answer_question("no"));
    assert!(state.next_question());

    let Screen::Game(game) = screen(&state) else {
        panic!("expected game");
    };
    // Four questions available, ten requested.
    assert!(game.advisory.is_some());
    assert_eq!(game.position_label(), "Question 2 / 4");
    assert_eq!(game.progress_percent, 50);
    assert_eq!(game.answered, 1);
    assert_eq!(game.navigator[0].status, NavStatus::Answered);
    assert_eq!(game.navigator[1].status, NavStatus::Current);
    assert_eq!(game.navigator[2].status, NavStatus::Unanswered);
    assert_eq!(game.option_for_letter('c'), Some("maybe"));
    assert!(game.can_go_previous && game.can_go_next);
    assert_eq!(game.clock, "0:00");
}

#[test]
fn paused_game_hides_the_question() {
    let mut state = loaded_state();
    state.start_game(&mut StdRng::seed_from_u64(3), fixed_now());
    assert!(state.toggle_timer());

    let screen = screen(&state);
    let Screen::Game(game) = &screen else {
        panic!("expected game");
    };
    assert!(game.paused);
    assert!(!game.can_go_next);
    let text = render(&screen);
    assert!(text.contains("Quiz Paused"));
    assert!(!text.contains("Question 1?") && !text.contains(") yes"));
}

#[test]
fn result_screen_scores_and_reviews() {
    let mut state = loaded_state();
    state.start_game(&mut StdRng::seed_from_u64(5), fixed_now());
    state.answer_question("yes");
    state.next_question();
    state.answer_question("yes");
    state.next_question();
    state.answer_question("no");
    state.finish_game(fixed_now());
    assert_eq!(state.game_state(), GameState::Result);

    let screen = screen(&state);
    let Screen::Result(result) = &screen else {
        panic!("expected result");
    };
    assert_eq!(result.score_label(), "2 / 4");
    assert_eq!(result.accuracy_percent, 50);
    assert_eq!(result.praise, Praise::WellDone);
    let verdicts: Vec<_> = result.review.iter().map(|row| row.verdict).collect();
    assert_eq!(
        verdicts,
        [
            Verdict::Correct,
            Verdict::Correct,
            Verdict::Incorrect,
            Verdict::Unanswered
        ]
    );
    assert_eq!(result.review[2].given.as_deref(), Some("no"));

    let text = render(&screen);
    assert!(text.starts_with("Well Done!"));
    assert!(text.contains("your answer: no"));
}

#[test]
fn error_screen_carries_the_message() {
    let mut state = QuizState::with_catalog(Settings::default());
    let ticket = state.select_bank(bank()).unwrap();
    state.complete_load(&ticket, Err(services::SourceError::NotAnArray));

    let screen = screen(&state);
    assert_eq!(
        screen,
        Screen::Error {
            message: "the question file is empty or invalid".to_owned(),
            can_change_subject: true,
        }
    );
}
