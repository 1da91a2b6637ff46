use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use letterform_core::{Config, Formation, FormationSession, SessionState};

mod command;
mod word_bank;

use command::Command;

/// Built-in word bank used when none is given.
const DEMO_WORDS: &[&str] = &["cat", "cats", "dog", "sun", "tree", "trees", "apple"];

#[derive(Parser)]
#[command(name = "letterform")]
#[command(about = "Form words from a stream of recognized letters")]
#[command(version)]
struct Cli {
    /// Word bank file (one word per line). May be repeated.
    #[arg(short, long = "words")]
    words_file: Vec<PathBuf>,

    /// Extra word for the bank. May be repeated.
    #[arg(long = "word")]
    word: Vec<String>,

    /// TOML file with session options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print each snapshot as a JSON line
    #[arg(long)]
    json: bool,
}

fn build_session(cli: &Cli) -> Result<FormationSession> {
    let config = match &cli.config {
        Some(path) => Config::load_toml(path)?,
        None => Config::default(),
    };

    let mut words: Vec<String> = Vec::new();
    for path in &cli.words_file {
        words.extend(word_bank::read_word_bank(path)?);
    }
    words.extend(cli.word.iter().cloned());
    if words.is_empty() {
        tracing::info!("no word bank given, using demo words");
        words.extend(DEMO_WORDS.iter().map(|w| w.to_string()));
    }

    let mut session = FormationSession::with_config(config);
    let loaded = session.load_word_bank(&words);
    tracing::info!(loaded, offered = words.len(), "word bank ready");
    Ok(session)
}

fn print_state(out: &mut impl Write, state: &SessionState, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, state).context("encoding state")?;
        writeln!(out)?;
        return Ok(());
    }

    let status = match &state.formation {
        Formation::Empty => "empty".to_string(),
        Formation::CompleteWord {
            word, can_continue, ..
        } => {
            if *can_continue {
                format!("word {} (can continue)", word)
            } else {
                format!("word {}", word)
            }
        }
        Formation::ValidPrefix { prefix, .. } => format!("prefix {}", prefix),
        Formation::InvalidSequence {
            sequence,
            last_valid_prefix,
        } => match last_valid_prefix {
            Some(p) => format!("no match for {} (last valid: {})", sequence, p),
            None => format!("no match for {}", sequence),
        },
    };
    if state.has_pending_letters() {
        writeln!(out, "  buffer: [{}]  {}", state.sequence, status)?;
    } else {
        writeln!(out, "  buffer: empty")?;
    }
    if !state.suggestions.is_empty() {
        writeln!(out, "  suggestions: {}", state.suggestions.join(", "))?;
    }
    if state.word_just_formed {
        if let Some(word) = &state.last_formed_word {
            writeln!(out, "  ✓ formed {} (:ack to acknowledge)", word)?;
        }
    }
    writeln!(
        out,
        "  letters: {}/{}{}  formed: [{}]",
        state.total_letters_in_session,
        state.letters_before_reset,
        if state.session_complete { " (complete)" } else { "" },
        state.formed_words.join(", ")
    )?;
    Ok(())
}

fn run_repl(mut session: FormationSession, json: bool) -> Result<()> {
    if !json {
        println!("letterform: one letter per line (optionally 'c 0.9'), or :confirm :undo :clear :reset :ack :state");
        println!("Ctrl-D to exit.");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match Command::parse(input) {
            Ok(cmd) => {
                if let Some(note) = cmd.apply(&mut session) {
                    if !json {
                        writeln!(out, "  {}", note)?;
                    }
                }
                print_state(&mut out, session.state(), json)?;
            }
            Err(e) => {
                tracing::warn!(input, error = %e, "bad input line");
                if !json {
                    writeln!(out, "  error: {}", e)?;
                }
            }
        }
        out.flush()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let session = build_session(&cli)?;
    run_repl(session, cli.json)
}
