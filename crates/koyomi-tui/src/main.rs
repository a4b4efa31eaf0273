//! `koyomi` — terminal client for a personal anime catalog.
//!
//! # Usage
//!
//! ```
//! koyomi                        # browse the catalog and the remote top list
//! koyomi import animelist.xml   # merge a MyAnimeList/Kitsu export
//! koyomi list                   # print the catalog to stdout
//! koyomi --db ~/anime.db        # custom database location
//! ```

mod app;
mod client;
mod ui;

use std::{
  io,
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use client::JikanClient;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use koyomi_core::store::CatalogStore;
use koyomi_store_sqlite::SqliteStore;
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "koyomi", about = "Personal anime catalog with platform-export import")]
struct Args {
  /// Path to a TOML config file (db_path).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Path to the catalog database (default: koyomi.db).
  #[arg(long, env = "KOYOMI_DB")]
  db: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Merge a platform export into the catalog.
  ///
  /// Takes the XML document MyAnimeList exports; Kitsu exports use the
  /// same shape.
  Import {
    /// Path to the exported XML document.
    file: PathBuf,
  },
  /// Print the catalog to stdout, ordered by id.
  List,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  db_path: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let db_path = args
    .db
    .or_else(|| (!file_cfg.db_path.is_empty()).then(|| PathBuf::from(&file_cfg.db_path)))
    .unwrap_or_else(|| PathBuf::from("koyomi.db"));

  // Schema creation is idempotent and runs on every open.
  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("opening catalog at {}", db_path.display()))?;

  match args.command {
    Some(Command::Import { file }) => {
      init_logging();
      import(&store, &file).await
    }
    Some(Command::List) => {
      init_logging();
      list(&store).await
    }
    None => run_tui(store).await,
  }
}

/// Only the plain subcommands log to stderr; in interactive mode the
/// alternate screen owns the terminal.
fn init_logging() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_writer(io::stderr)
    .init();
}

// ─── Subcommands ──────────────────────────────────────────────────────────────

async fn import(store: &SqliteStore, file: &Path) -> Result<()> {
  let bytes = std::fs::read(file)
    .with_context(|| format!("reading export {}", file.display()))?;

  tracing::info!("importing {}", file.display());
  let report = koyomi_mal::import_export(store, &bytes)
    .await
    .context("decoding export")?;

  for warning in &report.warnings {
    tracing::warn!("skipped {warning}");
  }
  println!(
    "accepted {} record(s), {} stale, {} warning(s)",
    report.accepted,
    report.stale,
    report.warnings.len(),
  );
  Ok(())
}

async fn list(store: &SqliteStore) -> Result<()> {
  for entry in store.list_all().await? {
    println!(
      "{:>6}  {:<48}  {:<13}  {}",
      entry.id, entry.title, entry.completion, entry.start_date,
    );
  }
  Ok(())
}

// ─── TUI ──────────────────────────────────────────────────────────────────────

async fn run_tui(store: SqliteStore) -> Result<()> {
  let client = JikanClient::new()?;
  let mut app = App::new(store, client);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Load initial data.
  let load_result = app.load_catalog().await;

  // Run the event loop; restore terminal even on error.
  let run_result = if load_result.is_ok() {
    run_event_loop(&mut terminal, &mut app).await
  } else {
    load_result
  };

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) => {
          let cont = app.handle_key(key).await?;
          if !cont {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }
  }

  Ok(())
}
