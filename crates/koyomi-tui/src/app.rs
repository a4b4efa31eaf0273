//! Application state machine and event dispatcher.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use koyomi_core::{entry::CatalogEntry, store::CatalogStore};
use koyomi_store_sqlite::SqliteStore;

use crate::client::{JikanClient, RemoteAnime};

// ─── Screen ───────────────────────────────────────────────────────────────────

/// Which pane the table is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
  /// The local catalog.
  Catalog,
  /// Jikan results — the top list, or a search.
  Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// The table plus search bar.
  Browse,
  /// Synopsis pane for one series.
  Detail,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state. All of it lives here or in the store;
/// nothing is process-global.
pub struct App {
  pub screen: Screen,
  pub pane:   Pane,

  /// The full catalog, id-ascending, as last loaded.
  pub entries: Vec<CatalogEntry>,

  /// Current remote rows (top list or search results).
  pub remote: Vec<RemoteAnime>,

  /// The top list is fetched once and kept for the session.
  top_cache: Option<Vec<RemoteAnime>>,

  /// Current filter string (catalog fuzzy filter / remote search query).
  pub filter: String,

  /// Whether the user is typing into the search bar.
  pub filter_active: bool,

  /// Cursor position within the visible table rows.
  pub cursor: usize,

  /// Series shown in the detail pane.
  pub detail: Option<RemoteAnime>,

  /// Scroll offset within the synopsis.
  pub detail_scroll: u16,

  pub show_help: bool,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  pub store:  SqliteStore,
  pub client: JikanClient,
}

impl App {
  pub fn new(store: SqliteStore, client: JikanClient) -> Self {
    Self {
      screen: Screen::Browse,
      pane: Pane::Catalog,
      entries: Vec::new(),
      remote: Vec::new(),
      top_cache: None,
      filter: String::new(),
      filter_active: false,
      cursor: 0,
      detail: None,
      detail_scroll: 0,
      show_help: false,
      status_msg: String::new(),
      store,
      client,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Reload the catalog pane from the store.
  pub async fn load_catalog(&mut self) -> anyhow::Result<()> {
    match self.store.list_all().await {
      Ok(entries) => {
        self.entries = entries;
        self.cursor = 0;
        self.status_msg = String::new();
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e.into())
      }
    }
  }

  /// Show the remote top list, fetching it on first use.
  async fn load_top(&mut self) {
    if let Some(cached) = &self.top_cache {
      self.remote = cached.clone();
      return;
    }
    self.status_msg = "Loading top anime…".into();
    match self.client.top_anime().await {
      Ok(list) => {
        self.top_cache = Some(list.clone());
        self.remote = list;
        self.status_msg = String::new();
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  async fn run_remote_search(&mut self, query: &str) {
    self.status_msg = format!("Searching for {query:?}…");
    match self.client.search(query).await {
      Ok(list) => {
        self.remote = list;
        self.cursor = 0;
        self.status_msg = String::new();
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  // ── Filtered rows ─────────────────────────────────────────────────────────

  /// Catalog entries matching the current filter query.
  pub fn filtered_entries(&self) -> Vec<&CatalogEntry> {
    if self.filter.is_empty() || self.pane != Pane::Catalog {
      return self.entries.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .entries
      .iter()
      .filter(|e| {
        matcher.fuzzy_match(&e.title, &self.filter).is_some()
          || matcher.fuzzy_match(&e.id.to_string(), &self.filter).is_some()
      })
      .collect()
  }

  /// Row count of the currently visible table.
  pub fn visible_rows(&self) -> usize {
    match self.pane {
      Pane::Catalog => self.filtered_entries().len(),
      Pane::Remote => self.remote.len(),
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    // Search input mode: all printable keys go into the query string.
    if self.filter_active {
      return self.handle_filter_key(key).await;
    }

    match self.screen {
      Screen::Browse => self.handle_browse_key(key).await,
      Screen::Detail => Ok(self.handle_detail_key(key)),
    }
  }

  async fn handle_filter_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.cursor = 0;
        if self.pane == Pane::Remote && !self.filter.is_empty() {
          let query = std::mem::take(&mut self.filter);
          self.run_remote_search(&query).await;
        }
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.cursor = 0;
      }
      _ => {}
    }
    Ok(true)
  }

  async fn handle_browse_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.visible_rows();
        if len > 0 && self.cursor + 1 < len {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.cursor = self.cursor.saturating_sub(1);
      }

      // Switch between the catalog and the remote top list.
      KeyCode::Tab => {
        self.filter.clear();
        self.cursor = 0;
        match self.pane {
          Pane::Catalog => {
            self.pane = Pane::Remote;
            self.load_top().await;
          }
          Pane::Remote => {
            self.pane = Pane::Catalog;
            self.load_catalog().await.ok();
          }
        }
      }

      // Search: fuzzy over the catalog, a Jikan query remotely.
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.cursor = 0;
      }

      KeyCode::Char('?') => self.show_help = !self.show_help,

      KeyCode::Enter => self.open_detail().await,

      _ => {}
    }
    Ok(true)
  }

  fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::Browse;
        self.detail = None;
        self.detail_scroll = 0;
      }
      KeyCode::Down | KeyCode::Char('j') => {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
      }
      KeyCode::Char('?') => self.show_help = !self.show_help,
      _ => {}
    }
    true
  }

  /// Transition to the detail pane for the row under the cursor.
  ///
  /// Remote rows already carry their synopsis; catalog rows need a fetch.
  async fn open_detail(&mut self) {
    let fetched = match self.pane {
      Pane::Remote => self.remote.get(self.cursor).cloned(),
      Pane::Catalog => {
        let Some(id) = self.filtered_entries().get(self.cursor).map(|e| e.id) else {
          return;
        };
        self.status_msg = "Loading…".into();
        match self.client.anime_by_id(id).await {
          Ok(anime) => {
            self.status_msg = String::new();
            Some(anime)
          }
          Err(e) => {
            self.status_msg = format!("Error: {e}");
            None
          }
        }
      }
    };

    if let Some(anime) = fetched {
      self.detail = Some(anime);
      self.detail_scroll = 0;
      self.screen = Screen::Detail;
    }
  }
}
