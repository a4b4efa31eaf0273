//! Browse pane — the catalog or remote table.

use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  widgets::{Block, Borders, Row, Table, TableState},
};

use crate::app::{App, Pane};

/// Render the active table into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  match app.pane {
    Pane::Catalog => draw_catalog(f, area, app),
    Pane::Remote => draw_remote(f, area, app),
  }
}

fn draw_catalog(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_entries();
  let total = app.entries.len();

  let title = if app.filter.is_empty() {
    format!(" Catalog ({total}) ")
  } else {
    format!(" Catalog ({}/{total}) ", filtered.len())
  };

  let rows: Vec<Row> = filtered
    .iter()
    .map(|e| {
      Row::new(vec![
        e.id.to_string(),
        e.title.clone(),
        e.completion.to_string(),
        e.start_date.to_string(),
        e.updated_date.format("%Y-%m-%d").to_string(),
      ])
    })
    .collect();

  let widths = [
    Constraint::Length(8),
    Constraint::Min(30),
    Constraint::Length(14),
    Constraint::Length(11),
    Constraint::Length(11),
  ];

  render_table(
    f,
    area,
    title,
    Row::new(vec!["Id", "Title", "Completion", "Started", "Updated"]),
    rows,
    &widths,
    app.cursor,
  );
}

fn draw_remote(f: &mut Frame, area: Rect, app: &App) {
  let title = format!(" Top anime ({}) ", app.remote.len());

  let rows: Vec<Row> = app
    .remote
    .iter()
    .map(|a| {
      Row::new(vec![
        a.mal_id.to_string(),
        a.title.clone(),
        a.rating.clone().unwrap_or_default(),
        a.score.map(|s| format!("{s:.2}")).unwrap_or_default(),
      ])
    })
    .collect();

  let widths = [
    Constraint::Length(8),
    Constraint::Min(30),
    Constraint::Length(30),
    Constraint::Length(6),
  ];

  render_table(
    f,
    area,
    title,
    Row::new(vec!["Id", "Title", "Rating", "Score"]),
    rows,
    &widths,
    app.cursor,
  );
}

fn render_table(
  f: &mut Frame,
  area: Rect,
  title: String,
  header: Row,
  rows: Vec<Row>,
  widths: &[Constraint],
  cursor: usize,
) {
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let empty = rows.is_empty();
  let table = Table::new(rows, widths.iter().copied())
    .header(header.style(Style::default().add_modifier(Modifier::BOLD)))
    .block(block)
    .row_highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    );

  let mut state = TableState::default();
  state.select(if empty { None } else { Some(cursor) });

  f.render_stateful_widget(table, area, &mut state);
}
