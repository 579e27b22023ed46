//! SwipeFeed CLI
//!
//! Command-line host for the feed engine:
//! - Browse a game list batch by batch
//! - Vote and read vote counts
//! - Write and read notes
//! - Feed score messages through the relay
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use swipefeed::config::{generate_default_config, Config};
use swipefeed::console::ConsolePort;
use swipefeed::feed::{EndPolicy, FeedPaginator, RenderMode, TriggerOutcome};
use swipefeed::loader::{load_games, open_source};
use swipefeed::logging::init_logging;
use swipefeed::relay::{OriginPolicy, RelayOutcome, ScoreRelay};
use swipefeed::store::{CounterStore, NoteStore, SqliteStore, StoreError, VoteCategory};

#[derive(Parser)]
#[command(name = "swipefeed")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Infinite swipe feed of games, from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/swipefeed/config.toml or ./swipefeed.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk through the feed batch by batch
    Browse {
        /// URL or path of games.json (overrides config)
        #[arg(short, long)]
        source: Option<String>,
        /// Cards per batch
        #[arg(short, long)]
        batch_size: Option<usize>,
        /// Live cards before pruning (0 = never prune)
        #[arg(short, long)]
        max_live: Option<usize>,
        /// At the end of the list: loop or stop
        #[arg(short, long)]
        end_policy: Option<EndPolicy>,
        /// frame or image
        #[arg(long)]
        mode: Option<RenderMode>,
        /// Scroll triggers to simulate after the first batch
        #[arg(long, default_value = "3")]
        steps: usize,
        /// Read commands from stdin instead of simulating steps
        #[arg(short, long)]
        interactive: bool,
        /// Also print pruning and observation events
        #[arg(short, long)]
        verbose: bool,
    },

    /// Record a vote
    Vote {
        /// up, super or down
        category: VoteCategory,
        /// Game id
        game: String,
    },

    /// Show vote counts of a game
    Counts {
        /// Game id
        game: String,
    },

    /// Add a note to a game
    Note {
        /// Game id
        game: String,
        /// Note text
        text: Vec<String>,
    },

    /// List the notes of a game
    Notes {
        /// Game id
        game: String,
    },

    /// Relay score messages (one JSON object per line)
    Relay {
        /// Origin the messages claim to come from
        #[arg(short, long)]
        origin: String,
        /// Extra allowed origins, on top of the config allowlist
        #[arg(short, long)]
        allow: Vec<String>,
        /// Game id of the sending frame
        #[arg(short, long)]
        game: Option<String>,
        /// Input file (default: stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_logging(&config.logging);

    match cli.command {
        Commands::Browse {
            source,
            batch_size,
            max_live,
            end_policy,
            mode,
            steps,
            interactive,
            verbose,
        } => {
            let mut config = config;
            if let Some(source) = source {
                config.source.location = source;
            }
            if let Some(size) = batch_size {
                config.feed.batch_size = size;
            }
            if let Some(max) = max_live {
                config.feed.max_live_items = max;
            }
            if let Some(policy) = end_policy {
                config.feed.end_policy = policy;
            }
            if let Some(mode) = mode {
                config.feed.render_mode = mode;
            }
            browse(&config, steps, interactive, verbose).await
        }

        Commands::Vote { category, game } => {
            let counters = CounterStore::with_namespace(open_store(&config)?, &config.store.namespace);
            let count = counters.increment(category, &game)?;
            println!("{} {}: {}", game, category, count);
            Ok(())
        }

        Commands::Counts { game } => {
            let counters = CounterStore::with_namespace(open_store(&config)?, &config.store.namespace);
            let counts = counters.counts(&game)?;
            println!("{}", game);
            println!("  up:    {}", counts.up);
            println!("  super: {}", counts.super_up);
            println!("  down:  {}", counts.down);
            Ok(())
        }

        Commands::Note { game, text } => {
            let notes = NoteStore::with_namespace(open_store(&config)?, &config.store.namespace);
            match notes.append(&game, &text.join(" ")) {
                Ok(note) => {
                    println!("Saved note for {} at {}", game, note.date.format("%Y-%m-%d %H:%M"));
                    Ok(())
                }
                Err(StoreError::EmptyNote) => {
                    eprintln!("Note is empty, nothing saved");
                    Ok(())
                }
                Err(e) => Err(e.into()),
            }
        }

        Commands::Notes { game } => {
            let notes = NoteStore::with_namespace(open_store(&config)?, &config.store.namespace);
            let list = notes.list(&game)?;
            if list.is_empty() {
                println!("No notes for {}", game);
            }
            for note in list {
                println!("{}  {}", note.date.format("%Y-%m-%d %H:%M"), note.text);
            }
            Ok(())
        }

        Commands::Relay {
            origin,
            allow,
            game,
            file,
        } => {
            let mut origins = config.relay.allowed_origins.clone();
            origins.extend(allow);
            let mut relay = ScoreRelay::new(OriginPolicy::allow(origins));

            let input: Box<dyn BufRead> = match file {
                Some(path) => Box::new(std::io::BufReader::new(
                    std::fs::File::open(&path)
                        .with_context(|| format!("Failed to open {}", path.display()))?,
                )),
                None => Box::new(std::io::stdin().lock()),
            };

            for line in input.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                match relay.receive(&origin, &line, game.as_deref()) {
                    RelayOutcome::Accepted(notice) => println!("{}", notice.message()),
                    RelayOutcome::RejectedOrigin => {
                        eprintln!("Origin {} is not allowed; message dropped", origin)
                    }
                    RelayOutcome::Ignored => {}
                }
            }

            println!("Total: {} ({} messages)", relay.total(), relay.accepted());
            Ok(())
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
            Ok(())
        }
    }
}

fn open_store(config: &Config) -> anyhow::Result<SqliteStore> {
    let path = config.store.resolved_db_path();
    SqliteStore::open(&path).with_context(|| format!("Failed to open store {}", path.display()))
}

async fn browse(config: &Config, steps: usize, interactive: bool, verbose: bool) -> anyhow::Result<()> {
    let source = open_source(&config.source.location);
    let games = match load_games(source.as_ref(), config.feed.render_mode).await {
        Ok(games) => games,
        Err(e) => {
            println!("{}", e.user_message());
            std::process::exit(1);
        }
    };

    let port = ConsolePort::new(std::io::stdout(), config.feed.render_mode).verbose(verbose);
    let mut feed = FeedPaginator::new(games, config.feed.clone(), port)?;
    report(feed.start());

    if !interactive {
        for _ in 0..steps {
            let outcome = feed.advance();
            let done = outcome == TriggerOutcome::Exhausted;
            report(outcome);
            if done {
                break;
            }
        }
        println!("{} live cards, next index {}", feed.live_count(), feed.cursor().next_index);
        return Ok(());
    }

    let store = open_store(config)?;
    let counters = CounterStore::with_namespace(store.clone(), &config.store.namespace);
    let notes = NoteStore::with_namespace(store, &config.store.namespace);

    println!("Enter: next batch | u / s / d: vote on last card | n <text>: note | q: quit");
    prompt();
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        let current = feed.live_items().last().map(|item| item.game.id.clone());

        match (line, current) {
            ("q", _) => break,
            ("", _) => report(feed.advance()),
            (cmd @ ("u" | "s" | "d"), Some(id)) => {
                let category = match cmd {
                    "u" => VoteCategory::Up,
                    "s" => VoteCategory::Super,
                    _ => VoteCategory::Down,
                };
                match counters.increment(category, &id) {
                    Ok(count) => println!("{} {}: {}", id, category, count),
                    Err(e) => eprintln!("Warning: vote not saved ({})", e),
                }
            }
            (cmd, Some(id)) if cmd.starts_with("n ") => match notes.append(&id, &cmd[2..]) {
                Ok(_) => println!("Saved note for {}", id),
                Err(StoreError::EmptyNote) => eprintln!("Note is empty, nothing saved"),
                Err(e) => eprintln!("Warning: note not saved ({})", e),
            },
            _ => eprintln!("Unknown command: {}", line),
        }
        prompt();
    }

    Ok(())
}

fn report(outcome: TriggerOutcome) {
    match outcome {
        TriggerOutcome::Appended(report) if report.looped => println!("-- back to the start --"),
        TriggerOutcome::Appended(_) => {}
        TriggerOutcome::Exhausted => println!("-- end of feed --"),
        TriggerOutcome::Busy | TriggerOutcome::NotVisible => {}
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
