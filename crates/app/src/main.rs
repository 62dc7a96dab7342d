mod command;
mod loading;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinError;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quiz_core::model::{GameState, SettingsPatch};
use services::config::{ENV_BANK, ENV_SOURCE_DIR, ENV_SOURCE_URL};
use services::{AppConfig, QuizController, StartOutcome};
use ui::{Screen, render};

use crate::command::Command;
use crate::loading::{LoadTask, finished, spawn_load};

/// Multiple-choice quiz in the terminal.
#[derive(Parser, Debug)]
#[command(name = "quizbank", version)]
struct Args {
    /// TOML config file (default: ./quizbank.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Open this bank directly instead of showing subject selection.
    #[arg(long)]
    bank: Option<String>,
    /// Fetch banks over HTTP relative to this URL.
    #[arg(long, conflicts_with = "source_dir")]
    source_url: Option<String>,
    /// Read banks from this directory.
    #[arg(long)]
    source_dir: Option<PathBuf>,
    /// Seed for reproducible question order.
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    /// CLI flags use the same override path as the environment and win over it.
    fn override_for(&self, key: &str) -> Option<String> {
        match key {
            ENV_SOURCE_URL => self.source_url.clone(),
            ENV_SOURCE_DIR => self
                .source_dir
                .as_ref()
                .map(|dir| dir.display().to_string()),
            ENV_BANK => self.bank.clone(),
            _ => None,
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

enum Input {
    Line(std::io::Result<Option<String>>),
    Loaded(Result<bool, JoinError>),
}

fn dispatch(
    controller: &QuizController,
    command: Command,
    loading: &mut Option<LoadTask>,
) -> Result<Flow, Box<dyn std::error::Error>> {
    let applied = match command {
        Command::Quit => return Ok(Flow::Quit),
        Command::Refresh => true,
        Command::SelectBank(id) => {
            let chosen = controller.choose_bank(&id)?;
            if chosen {
                *loading = Some(spawn_load(controller));
            }
            chosen
        }
        Command::Topic(topic) => controller.update_settings(SettingsPatch::topic(topic)),
        Command::Count(count) => controller.update_settings(SettingsPatch::question_count(count)),
        Command::SetTimer(enabled) => {
            controller.update_settings(SettingsPatch::timer_enabled(enabled))
        }
        Command::Start => match controller.start_game() {
            StartOutcome::Started { advisory } => {
                if let Some(advisory) = advisory {
                    println!("! {advisory}");
                }
                true
            }
            // The menu shows the advisory.
            StartOutcome::Blocked(_) => true,
            StartOutcome::Ignored => false,
        },
        Command::Answer(option) => controller.answer_question(&option),
        Command::Next => controller.next_question(),
        Command::Prev => controller.prev_question(),
        Command::GoTo(index) => controller.go_to_question(index),
        Command::Pause => controller.toggle_timer(),
        Command::Submit => controller.finish_game(),
        Command::Restart => controller.restart_game(),
        Command::Back => controller.back_to_subjects(),
        Command::Retry => {
            let retried = controller.begin_retry();
            if retried {
                *loading = Some(spawn_load(controller));
            }
            retried
        }
    };
    if !applied {
        println!("(not available right now)");
    }
    Ok(Flow::Continue)
}

/// Render, then wait for either a line of input or the end of a running fetch.
async fn repl(
    controller: &QuizController,
    mut loading: Option<LoadTask>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let screen = Screen::from_snapshot(&controller.snapshot(), controller.catalog());
        println!("\n{}", render(&screen));
        print!("> ");
        std::io::stdout().flush()?;

        let input = tokio::select! {
            line = lines.next_line() => Input::Line(line),
            joined = finished(&mut loading) => Input::Loaded(joined),
        };
        let line = match input {
            Input::Loaded(joined) => {
                loading = None;
                joined?;
                continue;
            }
            Input::Line(line) => match line? {
                Some(line) => line,
                None => return Ok(()),
            },
        };

        let command = match Command::parse(&line, &screen) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        if let Flow::Quit = dispatch(controller, command, &mut loading)? {
            return Ok(());
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    config.apply_overrides(|key| args.override_for(key))?;
    let source = config.build_source()?;

    let mut controller = match &config.single_bank {
        Some(bank) => QuizController::single_bank(
            config.catalog.clone(),
            bank,
            source,
            config.defaults.clone(),
        )?,
        None => QuizController::new(config.catalog.clone(), source, config.defaults.clone()),
    };
    if let Some(seed) = args.seed {
        controller = controller.with_seed(seed);
    }

    info!(
        banks = config.catalog.len(),
        single_bank = ?config.single_bank,
        source = ?config.source,
        "quizbank starting"
    );

    // Single-bank mode starts in Loading.
    let loading = (controller.game_state() == GameState::Loading).then(|| spawn_load(&controller));
    repl(&controller, loading).await
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use quiz_core::model::{BankConfig, BankId, QuestionDraft, QuestionId, Settings};
    use services::{BankCatalog, InMemoryQuestionSource};

    use super::*;

    fn controller() -> QuizController {
        let drafts: Vec<_> = (1..=3)
            .map(|id| QuestionDraft {
                id: QuestionId::new(id),
                topic: "HTML".into(),
                question: format!("Question {id}?"),
                options: vec!["A".into(), "B".into()],
                answer: "A".into(),
            })
            .collect();
        let source = InMemoryQuestionSource::new()
            .with_questions("web.json", &drafts)
            .with_latency(Duration::from_secs(2));
        let catalog =
            BankCatalog::new(vec![BankConfig::new("web", "Web Technology", "web.json")]).unwrap();
        QuizController::new(catalog, Arc::new(source), Settings::default())
    }

    fn screen(controller: &QuizController) -> Screen {
        Screen::from_snapshot(&controller.snapshot(), controller.catalog())
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn selecting_a_subject_renders_loading_while_the_fetch_runs() {
        let quiz = controller();
        let mut loading = None;

        let command = Command::parse("1", &screen(&quiz)).unwrap();
        assert_eq!(command, Command::SelectBank(BankId::new("web")));
        dispatch(&quiz, command, &mut loading).unwrap();
        assert!(loading.is_some());

        let mid_fetch = screen(&quiz);
        assert_eq!(
            mid_fetch,
            Screen::Loading {
                bank_name: "Web Technology".into()
            }
        );
        assert_eq!(render(&mid_fetch), "Loading Web Technology...");
        assert!(Command::parse("1", &mid_fetch).is_err());

        // Input keeps being handled while the fetch is in flight.
        let refresh = Command::parse("", &mid_fetch).unwrap();
        assert!(matches!(
            dispatch(&quiz, refresh, &mut loading).unwrap(),
            Flow::Continue
        ));
        assert_eq!(quiz.game_state(), GameState::Loading);

        assert!(finished(&mut loading).await.unwrap());
        assert!(matches!(screen(&quiz), Screen::Menu(_)));
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn idle_loader_never_finishes() {
        let mut loading = None;
        let idle = tokio::time::timeout(Duration::from_secs(60), finished(&mut loading)).await;
        assert!(idle.is_err());
    }
}
