//! Detail pane — synopsis and metadata for one series.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

/// Render the synopsis pane into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(anime) = &app.detail else {
    return;
  };

  let block = Block::default()
    .title(format!(" {} ", anime.title))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut meta = Vec::new();
  if let Some(status) = &anime.status {
    meta.push(status.clone());
  }
  if let Some(episodes) = anime.episodes {
    meta.push(format!("{episodes} episodes"));
  }
  if let Some(score) = anime.score {
    meta.push(format!("score {score:.2}"));
  }
  if let Some(rating) = &anime.rating {
    meta.push(rating.clone());
  }

  let mut lines = vec![
    Line::from(Span::styled(
      meta.join("  ·  "),
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    )),
    Line::from(""),
  ];
  lines.push(Line::from(
    anime
      .synopsis
      .clone()
      .unwrap_or_else(|| "No synopsis available.".to_owned()),
  ));

  f.render_widget(
    Paragraph::new(lines)
      .wrap(Wrap { trim: true })
      .scroll((app.detail_scroll, 0)),
    inner,
  );
}
