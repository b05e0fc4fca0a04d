use std::{
    path::PathBuf,
    sync::{Arc, OnceLock},
};

use clap::Parser;
use dictionary::Dictionary;
use tokio::sync::mpsc;

use config::Config;
use debounce::spawn_debouncer;
use deck::FlashcardDeck;
use lookup::{LookupOutcome, LookupService};
use recent::RecentWords;
use search::{Screen, SearchState, Ticket};
use storage::Storage;
use utilities::{parse_position, prompt, spawn_line_reader};

mod config;
mod debounce;
mod deck;
mod lookup;
mod recent;
mod render;
mod review;
mod search;
mod storage;
mod utilities;

/// Look up English words and review the recent ones as flashcards.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Database url, overrides the configuration file
    #[arg(long)]
    database: Option<String>,
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

fn init_logging(config: &Config) {
    let log_file = config.log_file.as_ref().map(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map(|file| (path, file))
    });
    match log_file {
        Some(Ok((path, file))) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_ansi(false)
                .with_writer(non_blocking)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %path.display(), "logging initialized");
        }
        other => {
            // stderr shares the terminal with the prompt, keep it quiet
            let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            if let Some(Err(error)) = other {
                tracing::warn!(%error, "failed to open log file; using stderr");
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Help,
    Recent,
    Clear,
    Cards,
    Open(Option<usize>),
    Unknown(&'a str),
    Input(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let Some(command) = line.trim().strip_prefix(':') else {
        return Command::Input(line);
    };
    let mut command_parts = command.split_ascii_whitespace();
    match command_parts.next().unwrap_or_default() {
        "exit" | "leave" | "quit" | "e" | "q" | "l" => Command::Quit,
        "help" | "h" => Command::Help,
        "recent" | "r" => Command::Recent,
        "clear" | "c" => Command::Clear,
        "cards" | "flashcards" | "practice" => Command::Cards,
        "open" | "o" => Command::Open(command_parts.next().and_then(parse_position)),
        _ => Command::Unknown(command),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(database) = args.database {
        config.database_url = database;
    }
    init_logging(&config);
    tracing::info!(?config, "wordbook starting");

    let storage = Arc::new(Storage::initialize(&config.database_url).await?);
    let recent = Arc::new(RecentWords::new(
        storage,
        config.storage_key.clone(),
        config.max_recent_words,
    ));
    let dict = Dictionary::new(&config.base_url)?;
    let service = Arc::new(LookupService::new(dict, recent.clone()));

    run(&config, service, recent).await?;
    tracing::info!("wordbook exited");
    Ok(())
}

async fn run(
    config: &Config,
    service: Arc<LookupService<Dictionary>>,
    recent: Arc<RecentWords>,
) -> anyhow::Result<()> {
    let mut lines = spawn_line_reader();
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (commit_tx, mut commit_rx) = mpsc::unbounded_channel();
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<(Ticket, LookupOutcome)>();
    spawn_debouncer(input_rx, commit_tx, config.debounce());

    let mut search = SearchState::default();
    render::print_help();
    refresh(&search, &recent).await;
    prompt(render::PROMPT);
    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    break;
                };
                match parse_command(&line) {
                    Command::Quit => break,
                    Command::Help => render::print_help(),
                    Command::Recent => {
                        render::print_recent(&load_recent(&recent).await, recent.capacity());
                    }
                    Command::Clear => {
                        search.clear();
                        input_tx.send(String::new())?;
                        refresh(&search, &recent).await;
                    }
                    Command::Cards => {
                        let words = load_recent(&recent).await;
                        let mut deck = FlashcardDeck::new(words, &mut rand::thread_rng());
                        review::review(&mut deck, &mut lines, config.reshuffle_delay()).await;
                        refresh(&search, &recent).await;
                    }
                    Command::Open(position) => {
                        let words = load_recent(&recent).await;
                        match position.and_then(|index| words.into_iter().nth(index)) {
                            Some(word) => {
                                search.show(word);
                                refresh(&search, &recent).await;
                            }
                            None => println!("There is no such recent word."),
                        }
                    }
                    Command::Unknown(command) => {
                        println!("Unknown command {command}. Type :help for a list.");
                    }
                    Command::Input(text) => {
                        search.set_input(text);
                        input_tx.send(text.to_owned())?;
                    }
                }
                prompt(render::prompt_text(search.is_loading()));
            }
            Some(term) = commit_rx.recv() => {
                let was_empty = matches!(search.screen(), Screen::Empty);
                let started = match search.commit(term) {
                    Some(ticket) => {
                        println!("Looking up '{}'...", ticket.term);
                        let service = service.clone();
                        let result_tx = result_tx.clone();
                        let loading = search.loading();
                        tokio::spawn(async move {
                            let outcome = service.lookup(&ticket.term, &loading).await;
                            let _ = result_tx.send((ticket, outcome));
                        });
                        true
                    }
                    None => {
                        if !was_empty {
                            refresh(&search, &recent).await;
                        }
                        false
                    }
                };
                // the spawned lookup may not have raised the flag yet
                prompt(render::prompt_text(started || search.is_loading()));
            }
            Some((ticket, outcome)) = result_rx.recv() => {
                tracing::debug!(
                    term = %ticket.term,
                    input = search.input(),
                    committed = search.committed(),
                    loading = search.is_loading(),
                    "lookup finished"
                );
                if search.apply(&ticket, outcome) {
                    refresh(&search, &recent).await;
                    prompt(render::prompt_text(search.is_loading()));
                }
            }
        }
    }
    Ok(())
}

async fn load_recent(recent: &RecentWords) -> Vec<dictionary::Word> {
    recent.load().await.unwrap_or_else(|error| {
        tracing::error!(%error, "failed to load recent words");
        Vec::new()
    })
}

async fn refresh(search: &SearchState, recent: &RecentWords) {
    let words = match search.screen() {
        Screen::Empty => load_recent(recent).await,
        _ => Vec::new(),
    };
    render::print_screen(search.screen(), &words, recent.capacity());
}
