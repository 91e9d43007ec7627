//! Terminal front-end for the notes app.
//!
//! # Responsibility
//! - Map subcommands to controller intents.
//! - Own process-level setup: config, logging, database.

mod terminal_view;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use notesapp_core::config::{ENV_DB_PATH, ENV_LAYOUT, ENV_STORAGE_KEY};
use notesapp_core::db::open_db;
use notesapp_core::{
    core_version, init_logging, logging_status, AppConfig, KvNoteStore, NotesApp, SqliteKvStore,
};
use std::io::{self, BufRead, Write};
use terminal_view::TerminalView;

#[derive(Debug, Parser)]
#[command(name = "notesapp", version, about = "Local notes kept in a SQLite key-value store")]
struct Cli {
    /// `editor` (titled notes with selection) or `board` (sticky notes).
    #[arg(long, global = true)]
    layout: Option<String>,
    /// SQLite database file.
    #[arg(long, global = true)]
    db: Option<String>,
    /// Storage key holding the note collection.
    #[arg(long, global = true)]
    key: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print all notes, most recently updated first.
    List,
    /// Create a note from the layout template.
    Add,
    /// Replace a note's content (and optionally its title).
    Edit {
        id: String,
        content: String,
        #[arg(long)]
        title: Option<String>,
    },
    /// Show one note in the editor pane (editor layout only).
    Select { id: String },
    /// Delete a note after confirmation.
    Delete {
        id: String,
        /// Do not prompt.
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Print resolved configuration.
    Info,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let stdout = io::stdout();
    let stdin = io::stdin();
    let assume_yes = matches!(cli.command, Command::Delete { yes: true, .. });
    let view =
        TerminalView::new(stdout.lock(), stdin.lock(), config.layout).assume_yes(assume_yes);

    if let Command::Info = cli.command {
        return print_info(view, &config);
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let kv = SqliteKvStore::try_new(&conn)?;
    let store = KvNoteStore::new(kv, config.storage_key.clone());
    let mut app = NotesApp::new(store, view, &config);

    if let Command::List = cli.command {
        app.refresh()?;
        return Ok(());
    }

    // Load the list the way an open UI would have it before the action.
    app.view_mut().set_muted(true);
    app.refresh()?;
    app.view_mut().set_muted(false);

    match cli.command {
        Command::Add => {
            let note = app.handle_add()?;
            app.view_mut().message(&format!("created {}", note.id));
        }
        Command::Edit { id, content, title } => {
            let note = app.handle_edit(&id, title, content)?;
            app.view_mut().message(&format!("saved {}", note.id));
        }
        Command::Select { id } => app.handle_select(&id)?,
        Command::Delete { id, .. } => {
            if app.handle_delete(&id)? {
                app.view_mut().message(&format!("deleted {id}"));
            } else {
                app.view_mut().message("delete cancelled");
            }
        }
        Command::List | Command::Info => {}
    }

    info!("event=cli_command module=cli status=ok");
    Ok(())
}

/// Resolves config with command-line flags taking precedence over env.
fn resolve_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let config = AppConfig::from_lookup(|name| {
        let flag = match name {
            ENV_LAYOUT => cli.layout.clone(),
            ENV_DB_PATH => cli.db.clone(),
            ENV_STORAGE_KEY => cli.key.clone(),
            _ => None,
        };
        flag.or_else(|| std::env::var(name).ok())
    })?;
    Ok(config)
}

fn print_info<W: Write, R: BufRead>(
    mut view: TerminalView<W, R>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    view.message(&format!("notesapp_core {}", core_version()));
    view.message(&format!("layout={}", config.layout.as_str()));
    view.message(&format!("db_path={}", config.db_path.display()));
    view.message(&format!("storage_key={}", config.storage_key));
    match logging_status() {
        Some((level, dir)) => view.message(&format!("log={} {}", level, dir.display())),
        None => view.message("log=disabled"),
    }
    Ok(())
}
