use ratatui::prelude::*;

use crate::notify::Level;

/// Truncate to `max_len` characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Fixed-width cell: truncated, then left-padded to `width`.
pub fn cell(s: &str, width: usize) -> String {
  format!("{:<width$}", truncate(s, width), width = width)
}

/// A yes/no flag as a coloured span; `None` renders as a dash.
pub fn flag(label: &'static str, value: Option<bool>) -> Span<'static> {
  match value {
    Some(true) => Span::styled(format!("{} ", label), Style::default().fg(Color::Green)),
    Some(false) => Span::styled(format!("{} ", label), Style::default().fg(Color::DarkGray)),
    None => Span::styled("- ", Style::default().fg(Color::DarkGray)),
  }
}

pub fn level_color(level: Level) -> Color {
  match level {
    Level::Success => Color::Green,
    Level::Error => Color::Red,
    Level::Info => Color::Cyan,
  }
}

/// Box for an input overlay in the top-left of `area`.
pub fn overlay_rect(area: Rect, height: u16) -> Rect {
  let width = (area.width * 60 / 100).clamp(30, 60).min(area.width.saturating_sub(2));
  Rect::new(
    area.x + 1,
    area.y + 1,
    width,
    height.min(area.height.saturating_sub(1)),
  )
}
