use super::KeyResult;
use crate::ui::renderfns::overlay_rect;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// A y/n prompt guarding a destructive action on the item at `T`.
#[derive(Debug, Clone)]
pub struct ConfirmPrompt<T> {
  prompt: String,
  target: T,
}

impl<T: Clone> ConfirmPrompt<T> {
  pub fn new(prompt: impl Into<String>, target: T) -> Self {
    Self {
      prompt: prompt.into(),
      target,
    }
  }

  /// `Event(Some(target))` on y, `Event(None)` on n or Esc. Everything else
  /// is swallowed while the prompt is up.
  pub fn handle_key(&self, key: KeyEvent) -> KeyResult<Option<T>> {
    match key.code {
      KeyCode::Char('y') | KeyCode::Char('Y') => KeyResult::Event(Some(self.target.clone())),
      KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => KeyResult::Event(None),
      _ => KeyResult::Handled,
    }
  }

  pub fn render_overlay(&self, frame: &mut Frame, area: Rect) {
    let overlay = overlay_rect(area, 3);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Red))
      .title(" Confirm ");
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let line = Line::from(vec![
      Span::raw(self.prompt.clone()),
      Span::styled(" [y/n]", Style::default().fg(Color::Yellow)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
  }
}
