//! TUI rendering — orchestrates all panes.

pub mod detail;
pub mod list;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, Pane, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let pane_label = match app.pane {
    Pane::Catalog => "catalog",
    Pane::Remote => "top anime",
  };
  let left = Span::styled(
    format!(" koyomi — {pane_label}  [Tab] switch  [/] search  [q] quit"),
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::DarkGray));

  // Simple left-right header: pad the middle.
  let left_width = left.content.len() as u16;
  let right_width = right.content.len() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  let table_area = if app.show_help {
    let split = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Min(0), Constraint::Length(4)])
      .split(area);
    draw_help(f, split[1], app);
    split[0]
  } else {
    area
  };

  match app.screen {
    Screen::Browse => list::draw(f, table_area, app),
    Screen::Detail => detail::draw(f, table_area, app),
  }
}

fn draw_help(f: &mut Frame, area: Rect, app: &App) {
  let lines = match app.screen {
    Screen::Browse => vec![
      Line::from("↑↓/jk move    Tab switch catalog/top    / search    Enter details"),
      Line::from("? help        q/Ctrl-C quit"),
    ],
    Screen::Detail => vec![
      Line::from("↑↓/jk scroll    Esc back    ? help    q/Ctrl-C quit"),
    ],
  };

  let block = Block::default()
    .title(" Help ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(lines).style(Style::default().fg(Color::DarkGray)),
    inner,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = if app.filter_active {
    ("SEARCH", "Type to search  Esc cancel  Enter run")
  } else {
    match app.screen {
      Screen::Browse => ("NORMAL", "↑↓/jk move  Tab switch  / search  Enter details  q quit"),
      Screen::Detail => ("DETAIL", "↑↓/jk scroll  Esc back  q quit"),
    }
  };

  let status = if app.filter_active {
    format!("/{}_", app.filter)
  } else if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
