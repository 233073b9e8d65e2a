use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::api::types::{ApiResponse, KysDetails, KysStep, KysVerificationStatus, Single, VerificationStatus};
use crate::hooks::Hooks;
use crate::query::QueryObserver;
use crate::ui::components::{ConfirmPrompt, KeyResult};
use crate::ui::ensure_valid_selection;
use crate::ui::renderfns::truncate;
use crate::ui::view::{ShortcutInfo, View, ViewAction};

type KysData = ApiResponse<Single<KysDetails>>;

/// Labels for the per-document verification flags, in the order keys 1-6
/// toggle them.
const CHECKS: [&str; 6] = [
  "Aadhaar",
  "Registration certificate",
  "College ID card",
  "Additional documents",
  "Video KYS",
  "College email",
];

fn check_values(status: &VerificationStatus) -> [bool; 6] {
  [
    status.is_aadhaar_verified,
    status.is_registration_certificate_verified,
    status.is_college_id_card_verified,
    status.is_additional_documents_verified,
    status.is_video_kys_document_verified,
    status.is_college_email_verified,
  ]
}

/// Copy of `status` with check `index` flipped.
fn toggled(status: &VerificationStatus, index: usize) -> VerificationStatus {
  let mut next = *status;
  let flag = match index {
    0 => &mut next.is_aadhaar_verified,
    1 => &mut next.is_registration_certificate_verified,
    2 => &mut next.is_college_id_card_verified,
    3 => &mut next.is_additional_documents_verified,
    4 => &mut next.is_video_kys_document_verified,
    _ => &mut next.is_college_email_verified,
  };
  *flag = !*flag;
  next
}

fn step_label(step: KysStep) -> &'static str {
  match step {
    KysStep::Aadhaar => "aadhaar",
    KysStep::CollegeEmail => "college email",
    KysStep::CollegeIdCard => "college id",
    KysStep::RegistrationCertificate => "reg. certificate",
    KysStep::AdditionalDocument => "additional doc",
    KysStep::Video => "video",
  }
}

fn status_label(status: Option<KysVerificationStatus>) -> (&'static str, Color) {
  match status {
    Some(KysVerificationStatus::Completed) => ("completed", Color::Green),
    Some(KysVerificationStatus::InProgress) => ("in progress", Color::Yellow),
    Some(KysVerificationStatus::Rejected) => ("rejected", Color::Red),
    Some(KysVerificationStatus::Pending) | None => ("pending", Color::DarkGray),
  }
}

/// KYS review for one student: document checks, rejection log, and the
/// final verify action.
pub struct KysView {
  student_id: String,
  student_name: String,
  hooks: Hooks,
  observer: QueryObserver<KysData>,
  logs_state: ListState,
  confirm: Option<ConfirmPrompt<()>>,
}

impl KysView {
  pub fn new(student_id: &str, student_name: &str, hooks: Hooks) -> Self {
    let mut observer = hooks.observe(hooks.kys_details(student_id));
    observer.mount();
    Self {
      student_id: student_id.to_string(),
      student_name: student_name.to_string(),
      hooks,
      observer,
      logs_state: ListState::default(),
      confirm: None,
    }
  }

  fn details(&self) -> Option<KysDetails> {
    self.observer.result().data().map(|d| d.data.item.clone())
  }

  fn toggle_check(&self, index: usize) {
    let Some(details) = self.details() else { return };
    let status = toggled(&details.verification_status, index);
    let hooks = self.hooks.clone();
    let id = self.student_id.clone();
    tokio::spawn(async move {
      let _ = hooks.update_verification_status(&id, &status).await;
    });
  }

  fn toggle_selected_log(&self) {
    let Some(details) = self.details() else { return };
    let Some(log) = self
      .logs_state
      .selected()
      .and_then(|i| details.verification_rejection_logs.get(i))
    else {
      return;
    };
    let hooks = self.hooks.clone();
    let id = self.student_id.clone();
    let log_id = log.id.clone();
    let resolved = !log.resolved;
    tokio::spawn(async move {
      let _ = hooks.resolve_rejection(&id, &log_id, resolved).await;
    });
  }

  fn verify(&self) {
    let hooks = self.hooks.clone();
    let id = self.student_id.clone();
    tokio::spawn(async move {
      let _ = hooks.verify_student(&id).await;
    });
  }

  fn render_summary(&self, frame: &mut Frame, area: Rect, details: &KysDetails) {
    let (label, color) = status_label(details.status);
    let percentage = details.verification_percentage.unwrap_or_default() * 100.0;

    let mut lines = vec![
      Line::from(vec![
        Span::styled("Status: ", Style::default().fg(Color::DarkGray)),
        Span::styled(label, Style::default().fg(color).bold()),
        Span::styled("   Progress: ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{:.0}%", percentage)),
        Span::styled("   Expires: ", Style::default().fg(Color::DarkGray)),
        Span::raw(details.expiry_date.clone().unwrap_or_else(|| "-".into())),
      ]),
      Line::from(vec![
        Span::styled("College email: ", Style::default().fg(Color::DarkGray)),
        Span::raw(details.college_email.clone().unwrap_or_else(|| "-".into())),
      ]),
      Line::raw(""),
    ];

    let docs = [
      details.aadhaar_number.as_deref(),
      details.registration_certificate_number.as_deref(),
      details.college_id_card_number.as_deref(),
      None,
      details.video_kys_document.as_deref(),
      details.college_email.as_deref(),
    ];
    for (i, (label, done)) in CHECKS.iter().zip(check_values(&details.verification_status)).enumerate() {
      let (mark, color) = if done { ("✓", Color::Green) } else { ("·", Color::DarkGray) };
      let detail = match (i, docs[i]) {
        (3, _) => format!("{} uploaded", details.additional_documents.len()),
        (_, Some(value)) => truncate(value, 40),
        (_, None) => "-".to_string(),
      };
      lines.push(Line::from(vec![
        Span::styled(format!(" {} ", i + 1), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{} ", mark), Style::default().fg(color)),
        Span::raw(format!("{:<26}", label)),
        Span::styled(detail, Style::default().fg(Color::DarkGray)),
      ]));
    }

    let block = Block::default()
      .title(format!(" KYS [{}] ", self.student_name))
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
  }

  fn render_logs(&mut self, frame: &mut Frame, area: Rect, details: &KysDetails) {
    let logs = &details.verification_rejection_logs;
    ensure_valid_selection(&mut self.logs_state, logs.len());

    let block = Block::default()
      .title(format!(" Rejections ({}) ", logs.len()))
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    let items: Vec<ListItem> = logs
      .iter()
      .map(|log| {
        let (state, color) = if log.resolved {
          ("resolved", Color::Green)
        } else {
          ("open", Color::Red)
        };
        ListItem::new(Line::from(vec![
          Span::styled(format!("{:<9}", state), Style::default().fg(color)),
          Span::styled(format!("{:<17}", step_label(log.issue_for)), Style::default().fg(Color::Yellow)),
          Span::raw(truncate(&log.reason, 60)),
        ]))
      })
      .collect();

    let list = List::new(items)
      .block(block)
      .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
      .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut self.logs_state);
  }
}

impl View for KysView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    if let Some(confirm) = &self.confirm {
      if let KeyResult::Event(answer) = confirm.handle_key(key) {
        self.confirm = None;
        if answer.is_some() {
          self.verify();
        }
      }
      return ViewAction::None;
    }

    match key.code {
      KeyCode::Char('j') | KeyCode::Down => self.logs_state.select_next(),
      KeyCode::Char('k') | KeyCode::Up => self.logs_state.select_previous(),
      KeyCode::Char(c @ '1'..='6') => self.toggle_check(c as usize - '1' as usize),
      KeyCode::Enter => self.toggle_selected_log(),
      KeyCode::Char('v') => {
        self.confirm = Some(ConfirmPrompt::new(format!("Verify {}?", self.student_name), ()));
      }
      KeyCode::Char('r') => self.observer.refetch(),
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let result = self.observer.result();
    let Some(data) = result.data() else {
      let content = match &result.error {
        Some(err) => format!("{}. Press 'r' to retry.", err.user_message()),
        None => "Loading...".to_string(),
      };
      let block = Block::default()
        .title(format!(" KYS [{}] ", self.student_name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
      frame.render_widget(
        Paragraph::new(content).block(block).style(Style::default().fg(Color::DarkGray)),
        area,
      );
      return;
    };

    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Length(11), Constraint::Min(3)])
      .split(area);
    let details = &data.data.item;
    self.render_summary(frame, chunks[0], details);
    self.render_logs(frame, chunks[1], details);

    if let Some(confirm) = &self.confirm {
      confirm.render_overlay(frame, area);
    }
  }

  fn breadcrumb_label(&self) -> String {
    format!("KYS [{}]", self.student_name)
  }

  fn tick(&mut self) {
    self.observer.poll();
  }

  fn is_capturing_input(&self) -> bool {
    self.confirm.is_some()
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new(":", "command").with_priority(10),
      ShortcutInfo::new("1-6", "toggle check").with_priority(20),
      ShortcutInfo::new("enter", "resolve").with_priority(30),
      ShortcutInfo::new("v", "verify").with_priority(35),
      ShortcutInfo::new("r", "refresh").with_priority(40),
      ShortcutInfo::new("q", "back").with_priority(90),
    ]
  }
}
