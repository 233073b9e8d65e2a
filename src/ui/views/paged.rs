use crossterm::event::{KeyCode, KeyEvent};
use futures::future::BoxFuture;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::api::types::PageInfo;
use crate::hooks::Hooks;
use crate::query::{QueryDef, QueryObserver};
use crate::ui::components::{ConfirmPrompt, KeyResult, SearchEvent, SearchInput};
use crate::ui::ensure_valid_selection;
use crate::ui::view::{ShortcutInfo, View, ViewAction};

/// What a row key does once the listing has decided.
pub enum RowAction {
  /// Run a mutation in the background; its invalidation refreshes the list
  Spawn(BoxFuture<'static, ()>),
  /// Drill into the row
  Open(Box<dyn View>),
}

/// One paginated resource, as shown by [`PagedView`].
pub trait Listing: 'static {
  type Data: Send + Sync + 'static;
  type Item;

  fn title(&self) -> String;

  /// Read hook for a 1-based `page`. `search` is only passed to
  /// searchable listings.
  fn query(&self, hooks: &Hooks, page: u32, limit: u32, search: Option<&str>) -> QueryDef<Self::Data>;

  fn items<'a>(&self, data: &'a Self::Data) -> &'a [Self::Item];

  fn page_info(&self, data: &Self::Data) -> PageInfo;

  fn row(&self, item: &Self::Item) -> Line<'static>;

  /// Identifier passed to `delete` after confirmation.
  fn id(&self, item: &Self::Item) -> String;

  fn name(&self, item: &Self::Item) -> String;

  fn searchable(&self) -> bool {
    false
  }

  fn deletable(&self) -> bool {
    false
  }

  fn delete(&self, _hooks: &Hooks, _id: String) -> Option<BoxFuture<'static, ()>> {
    None
  }

  /// Enter on a row.
  fn open(&self, _hooks: &Hooks, _item: &Self::Item) -> Option<Box<dyn View>> {
    None
  }

  /// Extra row shortcuts (toggles, drill-downs).
  fn actions(&self) -> Vec<ShortcutInfo> {
    Vec::new()
  }

  fn run_action(&self, _key: char, _hooks: &Hooks, _item: &Self::Item) -> Option<RowAction> {
    None
  }
}

/// A server-paginated list with search, delete and drill-down.
pub struct PagedView<L: Listing> {
  listing: L,
  hooks: Hooks,
  observer: QueryObserver<L::Data>,
  page: u32,
  limit: u32,
  search: Option<String>,
  search_input: SearchInput,
  confirm: Option<ConfirmPrompt<String>>,
  list_state: ListState,
}

impl<L: Listing> PagedView<L> {
  pub fn new(listing: L, hooks: Hooks, limit: u32) -> Self {
    let mut observer = hooks.observe(listing.query(&hooks, 1, limit, None));
    observer.mount();
    Self {
      listing,
      hooks,
      observer,
      page: 1,
      limit,
      search: None,
      search_input: SearchInput::new(),
      confirm: None,
      list_state: ListState::default(),
    }
  }

  pub fn page(&self) -> u32 {
    self.page
  }

  /// Waits until the current page is no longer fetching.
  pub async fn settled(&mut self) {
    self.observer.settled().await;
  }

  fn reload(&mut self) {
    let def = self
      .listing
      .query(&self.hooks, self.page, self.limit, self.search.as_deref());
    self.observer.set_query(def);
  }

  fn go_to(&mut self, page: u32) {
    if page != self.page {
      self.page = page;
      self.list_state.select(Some(0));
      self.reload();
    }
  }

  fn total_pages(&self) -> Option<u32> {
    let result = self.observer.result();
    result.data().map(|data| self.listing.page_info(data).total_pages)
  }

  fn apply_search(&mut self, term: Option<String>) {
    let term = term.filter(|t| !t.is_empty());
    if term != self.search {
      self.search = term;
      self.page = 1;
      self.list_state.select(Some(0));
      self.reload();
    }
  }

  fn selected<R>(&self, f: impl FnOnce(&L, &L::Item) -> R) -> Option<R> {
    let result = self.observer.result();
    let data = result.data()?;
    let item = self.listing.items(data).get(self.list_state.selected()?)?;
    Some(f(&self.listing, item))
  }

  fn title(&self) -> String {
    let result = self.observer.result();
    let mut title = format!(" {}", self.listing.title());
    if let Some(term) = &self.search {
      title.push_str(&format!(" /{}", term));
    }
    if let Some(data) = result.data() {
      let info = self.listing.page_info(data);
      title.push_str(&format!(" [{}/{}] ({})", info.page, info.total_pages.max(1), info.total));
    }
    if result.is_loading() || result.is_previous_data {
      title.push_str(" (loading...)");
    } else if result.is_fetching {
      title.push_str(" (refreshing...)");
    }
    title.push(' ');
    title
  }

  fn render_list(&mut self, frame: &mut Frame, area: Rect) {
    let result = self.observer.result();
    let block = Block::default()
      .title(self.title())
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    let items = result.data().map(|d| self.listing.items(d)).unwrap_or(&[]);
    ensure_valid_selection(&mut self.list_state, items.len());

    if items.is_empty() {
      let content = match &result.error {
        Some(err) if result.data.is_none() => format!("{}. Press 'r' to retry.", err.user_message()),
        _ if result.is_loading() => "Loading...".to_string(),
        _ => "Nothing here yet.".to_string(),
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    let rows: Vec<ListItem> = items.iter().map(|item| ListItem::new(self.listing.row(item))).collect();
    let list = List::new(rows)
      .block(block)
      .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
      .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut self.list_state);
  }
}

impl<L: Listing> View for PagedView<L> {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    if let Some(confirm) = &self.confirm {
      if let KeyResult::Event(answer) = confirm.handle_key(key) {
        self.confirm = None;
        if let Some(fut) = answer.and_then(|id| self.listing.delete(&self.hooks, id)) {
          tokio::spawn(fut);
        }
      }
      return ViewAction::None;
    }

    if self.listing.searchable() {
      match self.search_input.handle_key(key) {
        KeyResult::Event(SearchEvent::Submitted(term)) => {
          self.apply_search(Some(term));
          return ViewAction::None;
        }
        KeyResult::Event(SearchEvent::Cleared) => {
          self.apply_search(None);
          return ViewAction::None;
        }
        KeyResult::Handled => return ViewAction::None,
        KeyResult::NotHandled => {}
      }
    }

    match key.code {
      KeyCode::Char('j') | KeyCode::Down => self.list_state.select_next(),
      KeyCode::Char('k') | KeyCode::Up => self.list_state.select_previous(),
      KeyCode::Char('n') | KeyCode::Right => {
        if self.total_pages().is_some_and(|total| self.page < total) {
          self.go_to(self.page + 1);
        }
      }
      KeyCode::Char('p') | KeyCode::Left => {
        if self.page > 1 {
          self.go_to(self.page - 1);
        }
      }
      KeyCode::Char('r') => self.observer.refetch(),
      KeyCode::Char('d') if self.listing.deletable() => {
        self.confirm = self.selected(|listing, item| {
          ConfirmPrompt::new(format!("Delete {}?", listing.name(item)), listing.id(item))
        });
      }
      KeyCode::Enter => {
        let hooks = self.hooks.clone();
        if let Some(view) = self.selected(|listing, item| listing.open(&hooks, item)).flatten() {
          return ViewAction::Push(view);
        }
      }
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      KeyCode::Char(c) => {
        let hooks = self.hooks.clone();
        match self.selected(|listing, item| listing.run_action(c, &hooks, item)).flatten() {
          Some(RowAction::Spawn(fut)) => {
            tokio::spawn(fut);
          }
          Some(RowAction::Open(view)) => return ViewAction::Push(view),
          None => {}
        }
      }
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    self.render_list(frame, area);
    self.search_input.render_overlay(frame, area);
    if let Some(confirm) = &self.confirm {
      confirm.render_overlay(frame, area);
    }
  }

  fn breadcrumb_label(&self) -> String {
    self.listing.title()
  }

  fn tick(&mut self) {
    self.observer.poll();
  }

  fn is_capturing_input(&self) -> bool {
    self.search_input.is_active() || self.confirm.is_some()
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    let mut shortcuts = vec![
      ShortcutInfo::new(":", "command").with_priority(10),
      ShortcutInfo::new("n/p", "page").with_priority(20),
      ShortcutInfo::new("r", "refresh").with_priority(40),
      ShortcutInfo::new("q", "back").with_priority(90),
    ];
    if self.listing.searchable() {
      shortcuts.push(ShortcutInfo::new("/", "search").with_priority(15));
    }
    if self.listing.deletable() {
      shortcuts.push(ShortcutInfo::new("d", "delete").with_priority(50));
    }
    shortcuts.extend(self.listing.actions());
    shortcuts
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::types::{ApiResponse, Institution, Page, Paginator};
  use crate::hooks::test_support::fixture;
  use crossterm::event::KeyModifiers;
  use serde_json::json;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, ResponseTemplate};

  struct Names;

  impl Listing for Names {
    type Data = ApiResponse<Page<Institution>>;
    type Item = Institution;

    fn title(&self) -> String {
      "Institutions".into()
    }

    fn query(&self, hooks: &Hooks, page: u32, limit: u32, _search: Option<&str>) -> QueryDef<Self::Data> {
      hooks.institutions(page, limit)
    }

    fn items<'a>(&self, data: &'a Self::Data) -> &'a [Institution] {
      &data.data.items
    }

    fn page_info(&self, data: &Self::Data) -> PageInfo {
      data.data.pagination.info()
    }

    fn row(&self, item: &Institution) -> Line<'static> {
      Line::raw(item.name.clone())
    }

    fn id(&self, item: &Institution) -> String {
      item.id.clone()
    }

    fn name(&self, item: &Institution) -> String {
      item.name.clone()
    }
  }

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn body(page: u32, total_pages: u32, name: &str) -> serde_json::Value {
    json!({
      "data": {
        "institutions": [{ "_id": format!("i{}", page), "name": name, "isVerified": true }],
        "pagination": { "page": page, "limit": 1, "totalPages": total_pages, "totalDocs": total_pages }
      }
    })
  }

  #[tokio::test]
  async fn test_paging_stays_within_bounds() {
    let fx = fixture().await;
    for (page, name) in [(1, "IIT"), (2, "NIT")] {
      Mock::given(method("GET"))
        .and(path("/api/institutions"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(page, 2, name)))
        .mount(&fx.server)
        .await;
    }

    let mut view = PagedView::new(Names, fx.hooks.clone(), 1);
    view.settled().await;
    view.tick();

    view.handle_key(key(KeyCode::Char('p')));
    assert_eq!(view.page(), 1);

    view.handle_key(key(KeyCode::Char('n')));
    assert_eq!(view.page(), 2);
    view.settled().await;
    view.tick();
    assert_eq!(view.selected(|l, item| l.name(item)), Some("NIT".to_string()));

    view.handle_key(key(KeyCode::Char('n')));
    assert_eq!(view.page(), 2);
  }

  #[tokio::test]
  async fn test_delete_ignored_for_read_only_listing() {
    let fx = fixture().await;
    Mock::given(method("GET"))
      .and(path("/api/institutions"))
      .respond_with(ResponseTemplate::new(200).set_body_json(body(1, 1, "IIT")))
      .mount(&fx.server)
      .await;

    let mut view = PagedView::new(Names, fx.hooks.clone(), 1);
    view.settled().await;
    view.tick();

    // Names is not deletable, so 'd' never raises a prompt
    view.handle_key(key(KeyCode::Char('d')));
    assert!(!view.is_capturing_input());
    assert!(matches!(view.handle_key(key(KeyCode::Char('q'))), ViewAction::Pop));
  }
}
