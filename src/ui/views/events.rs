use futures::FutureExt;
use ratatui::prelude::*;

use super::paged::{Listing, PagedView, RowAction};
use crate::api::types::{ApiResponse, Page, PageInfo, Paginator, SocialEvent, SocialEventTransaction};
use crate::hooks::Hooks;
use crate::query::QueryDef;
use crate::ui::renderfns::cell;
use crate::ui::view::{ShortcutInfo, View};

/// Social events. Enter opens the event's ticket transactions.
pub struct EventListing {
  page_size: u32,
}

impl EventListing {
  pub fn new(page_size: u32) -> Self {
    Self { page_size }
  }
}

impl Listing for EventListing {
  type Data = ApiResponse<Page<SocialEvent>>;
  type Item = SocialEvent;

  fn title(&self) -> String {
    "Events".to_string()
  }

  fn query(&self, hooks: &Hooks, page: u32, limit: u32, _search: Option<&str>) -> QueryDef<Self::Data> {
    hooks.social_events(page, limit)
  }

  fn items<'a>(&self, data: &'a Self::Data) -> &'a [SocialEvent] {
    &data.data.items
  }

  fn page_info(&self, data: &Self::Data) -> PageInfo {
    data.data.info()
  }

  fn row(&self, e: &SocialEvent) -> Line<'static> {
    Line::from(vec![
      Span::raw(cell(&e.name, 30)),
      Span::raw(" "),
      Span::styled(
        format!("{} → {}", day(&e.start_date), day(&e.end_date)),
        Style::default().fg(Color::Cyan),
      ),
      Span::raw("  "),
      Span::styled(format!("₹{}", e.discounted_price), Style::default().fg(Color::Green)),
      Span::styled(
        format!(" (₹{}, -{}%)", e.actual_price, e.discount_percentage),
        Style::default().fg(Color::DarkGray),
      ),
    ])
  }

  fn id(&self, e: &SocialEvent) -> String {
    e.id.clone()
  }

  fn name(&self, e: &SocialEvent) -> String {
    e.name.clone()
  }

  fn open(&self, hooks: &Hooks, e: &SocialEvent) -> Option<Box<dyn View>> {
    let listing = TransactionListing::new(&e.id, &e.name);
    Some(Box::new(PagedView::new(listing, hooks.clone(), self.page_size)))
  }
}

/// Date part of an ISO timestamp.
fn day(timestamp: &str) -> &str {
  timestamp.split('T').next().unwrap_or(timestamp)
}

/// Ticket transactions of one event. `v` flips the validity mark.
pub struct TransactionListing {
  event_id: String,
  event_name: String,
}

impl TransactionListing {
  pub fn new(event_id: &str, event_name: &str) -> Self {
    Self {
      event_id: event_id.to_string(),
      event_name: event_name.to_string(),
    }
  }
}

impl Listing for TransactionListing {
  type Data = ApiResponse<Page<SocialEventTransaction>>;
  type Item = SocialEventTransaction;

  fn title(&self) -> String {
    format!("Transactions [{}]", self.event_name)
  }

  fn query(&self, hooks: &Hooks, page: u32, limit: u32, _search: Option<&str>) -> QueryDef<Self::Data> {
    hooks.social_event_transactions(&self.event_id, Some(page), Some(limit), None)
  }

  fn items<'a>(&self, data: &'a Self::Data) -> &'a [SocialEventTransaction] {
    &data.data.items
  }

  fn page_info(&self, data: &Self::Data) -> PageInfo {
    data.data.info()
  }

  fn row(&self, t: &SocialEventTransaction) -> Line<'static> {
    let (state, color) = if t.is_transaction_valid {
      ("valid", Color::Green)
    } else {
      ("unchecked", Color::Yellow)
    };
    Line::from(vec![
      Span::styled(format!("{:<10}", state), Style::default().fg(color)),
      Span::raw(cell(&self.name(t), 24)),
      Span::raw(" "),
      Span::styled(
        cell(t.transaction_id.as_deref().unwrap_or("-"), 24),
        Style::default().fg(Color::Cyan),
      ),
      Span::raw(" "),
      Span::styled(
        t.transaction_proof.as_ref().map(|p| p.path.clone()).unwrap_or_default(),
        Style::default().fg(Color::DarkGray),
      ),
    ])
  }

  fn id(&self, t: &SocialEventTransaction) -> String {
    t.id.clone()
  }

  /// Student name when the record came populated, else the id.
  fn name(&self, t: &SocialEventTransaction) -> String {
    let student = t.student.as_ref();
    let first = student.and_then(|s| s.get("firstName")).and_then(|v| v.as_str());
    let last = student.and_then(|s| s.get("lastName")).and_then(|v| v.as_str());
    match (first, last) {
      (Some(first), Some(last)) => format!("{} {}", first, last),
      (Some(first), None) => first.to_string(),
      _ => student.and_then(|s| s.as_str()).unwrap_or(t.id.as_str()).to_string(),
    }
  }

  fn actions(&self) -> Vec<ShortcutInfo> {
    vec![ShortcutInfo::new("v", "validate").with_priority(60)]
  }

  fn run_action(&self, key: char, hooks: &Hooks, t: &SocialEventTransaction) -> Option<RowAction> {
    if key != 'v' {
      return None;
    }
    let hooks = hooks.clone();
    let id = t.id.clone();
    let valid = !t.is_transaction_valid;
    Some(RowAction::Spawn(
      async move {
        let _ = hooks.mark_transaction_valid(&id, valid).await;
      }
      .boxed(),
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn transaction(student: serde_json::Value) -> SocialEventTransaction {
    serde_json::from_value(json!({ "_id": "t1", "student": student })).unwrap()
  }

  #[test]
  fn test_transaction_name_from_populated_student() {
    let listing = TransactionListing::new("e1", "Fresher's Night");
    assert_eq!(
      listing.name(&transaction(json!({ "firstName": "Riya", "lastName": "Sen" }))),
      "Riya Sen"
    );
    assert_eq!(listing.name(&transaction(json!("s42"))), "s42");
    assert_eq!(listing.name(&transaction(json!(null))), "t1");
  }

  #[test]
  fn test_day_strips_time() {
    assert_eq!(day("2024-03-01T18:30:00.000Z"), "2024-03-01");
    assert_eq!(day("2024-03-01"), "2024-03-01");
  }
}
