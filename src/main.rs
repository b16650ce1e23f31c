//! Vocabulary Drill - CLI
//!
//! Czech-Russian vocabulary drills with TUI and text modes, plus word-set and
//! statistics management.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use vocab_drill::{
    commands::{ReportFilter, SortOrder, overview, run_simple, word_report},
    config::DrillConfig,
    logging::init_tracing,
    output::{
        print_delete_report, print_export, print_import_report, print_overview,
        print_reload_report, print_reset, print_set_summaries, print_word_deleted,
        print_word_report,
    },
    selection::SelectionMode,
    session::{SessionController, SessionRequest, SessionSize, SetFilter},
    store::{JsonFileStore, WordStore, library},
};

#[derive(Parser)]
#[command(
    name = "vocab_drill",
    about = "Vocabulary drills with adaptive word selection and in-session retries",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory holding the word collection (default: $VOCAB_DRILL_HOME or ~/.vocab_drill)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log filter, e.g. 'info' or 'vocab_drill=debug' (default: $RUST_LOG or 'warn')
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Word set to practice or report on (default: all sets)
    #[arg(long, global = true)]
    set: Option<String>,

    /// Selection mode: smart (default), random, problematic, new; anything else uses every word
    #[arg(short, long, global = true, default_value = "smart")]
    mode: String,

    /// Words per session: a number or 'all'
    #[arg(short = 'n', long, global = true, default_value = "20")]
    size: SessionSize,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI drill (default)
    Play,

    /// Text-mode drill without TUI
    Simple,

    /// Import a word set from a JSON file
    Import {
        /// JSON array of {cs, tr, ru} objects
        file: PathBuf,

        /// Set name (default: file name without extension)
        #[arg(long)]
        name: Option<String>,
    },

    /// Rebuild a word set from its file, keeping statistics of remaining words
    Reload {
        file: PathBuf,

        #[arg(long)]
        name: Option<String>,
    },

    /// Delete a word set and its statistics
    DeleteSet {
        name: String,

        /// File the set was imported from, to clear its loaded marker
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Delete one word and its statistics
    DeleteWord {
        /// Czech text of the word
        cs: String,

        /// Its Russian translation
        ru: String,
    },

    /// List imported word sets
    Sets,

    /// Show learning statistics
    Stats {
        /// Only words whose text, translation or transcription contains this
        #[arg(long)]
        search: Option<String>,

        /// Weakest words first
        #[arg(long)]
        ascending: bool,
    },

    /// Export the collection as a word-set file
    Export {
        /// Output path
        out: PathBuf,
    },

    /// Clear every word's answer history
    ResetStats {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = DrillConfig::resolve(cli.data_dir.clone(), cli.log_level.clone());

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    // The TUI owns the terminal, so its logs go to a file
    let log_file = matches!(command, Commands::Play).then(|| config.log_file());
    init_tracing(&config.log_level, log_file.as_deref())?;
    tracing::debug!(data_dir = %config.data_dir.display(), "configuration resolved");

    let store = JsonFileStore::new(&config.data_dir);
    let request = SessionRequest {
        set: cli.set.clone().map_or(SetFilter::All, SetFilter::Named),
        mode: SelectionMode::from_name(&cli.mode),
        size: cli.size,
    };

    match command {
        Commands::Play => run_play_command(store, request),
        Commands::Simple => run_simple(&mut SessionController::new(store), &request),
        Commands::Import { file, name } => run_import_command(&store, &file, name),
        Commands::Reload { file, name } => run_reload_command(&store, &file, name),
        Commands::DeleteSet { name, file } => {
            let key = file.as_deref().map(source_key).transpose()?;
            let removed = library::delete_set(&store, &name, key.as_deref())?;
            print_delete_report(&name, removed);
            Ok(())
        }
        Commands::DeleteWord { cs, ru } => {
            let removed = library::delete_word(&store, &cs, &ru)?;
            print_word_deleted(&cs, &ru, removed);
            Ok(())
        }
        Commands::Sets => {
            print_set_summaries(&library::set_summaries(&store.load_words()?));
            Ok(())
        }
        Commands::Stats { search, ascending } => {
            let words = store.load_words()?;
            let filter = ReportFilter {
                set: cli.set,
                search,
                order: if ascending {
                    SortOrder::Ascending
                } else {
                    SortOrder::Descending
                },
            };
            print_overview(&overview(&words));
            print_word_report(&word_report(&words, &filter));
            Ok(())
        }
        Commands::Export { out } => {
            let words = store.load_words()?;
            let json = library::export_words(&words)?;
            fs::write(&out, json).with_context(|| format!("failed to write {}", out.display()))?;
            print_export(&out, words.len());
            Ok(())
        }
        Commands::ResetStats { yes } => {
            if !yes {
                bail!("this clears every word's history; run again with --yes to confirm");
            }
            print_reset(library::reset_stats(&store)?);
            Ok(())
        }
    }
}

/// Set name from the flag, else the file stem
fn set_name(file: &Path, name: Option<String>) -> Result<String> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name.trim().to_string()),
        _ => file
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .with_context(|| format!("cannot derive a set name from {}", file.display())),
    }
}

/// Loaded-sets marker for a word-set file
fn source_key(file: &Path) -> Result<String> {
    file.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .with_context(|| format!("invalid word-set file name {}", file.display()))
}

fn run_import_command(store: &JsonFileStore, file: &Path, name: Option<String>) -> Result<()> {
    let set = set_name(file, name)?;
    let words = library::load_word_set(file)?;
    let report = library::import_set(store, &set, &source_key(file)?, words)?;
    print_import_report(&set, &report);
    Ok(())
}

fn run_reload_command(store: &JsonFileStore, file: &Path, name: Option<String>) -> Result<()> {
    let set = set_name(file, name)?;
    let words = library::load_word_set(file)?;
    let report = library::reload_set(store, &set, words)?;
    print_reload_report(&set, &report);
    Ok(())
}

fn run_play_command(store: JsonFileStore, request: SessionRequest) -> Result<()> {
    use vocab_drill::interactive::{App, run_tui};

    let app = App::new(SessionController::new(store), request);
    run_tui(app)
}
