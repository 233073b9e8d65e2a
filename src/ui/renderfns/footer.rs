use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::utils::level_color;
use crate::notify::Notification;

/// Draw the footer bar: view breadcrumb on the left, latest notification
/// on the right.
pub fn draw_footer(
  frame: &mut Frame,
  area: Rect,
  breadcrumb: &[String],
  notification: Option<&Notification>,
) {
  let mut spans = vec![Span::raw(" ")];

  for (i, part) in breadcrumb.iter().enumerate() {
    if i > 0 {
      spans.push(Span::styled(" > ", Style::default().fg(Color::DarkGray)));
    }

    let style = if i == breadcrumb.len() - 1 {
      Style::default().fg(Color::Cyan).bold()
    } else {
      Style::default().fg(Color::White)
    };

    spans.push(Span::styled(part.clone(), style));
  }

  if let Some(n) = notification {
    let color = level_color(n.level);
    spans.push(Span::styled("   │ ", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(n.title.clone(), Style::default().fg(color).bold()));
    if !n.message.is_empty() {
      spans.push(Span::styled(format!(": {}", n.message), Style::default().fg(color)));
    }
  }

  let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
  frame.render_widget(paragraph, area);
}
