use futures::future::BoxFuture;
use futures::FutureExt;
use ratatui::prelude::*;

use super::paged::{Listing, PagedView, RowAction};
use super::staff::StaffListing;
use crate::api::types::{ApiResponse, Categories, Category, Merchant, Page, PageInfo, Paginator, StoreLocation};
use crate::hooks::Hooks;
use crate::query::QueryDef;
use crate::ui::renderfns::{cell, flag};
use crate::ui::view::{ShortcutInfo, View};

/// Merchants, searchable by name. Enter opens the merchant's stores.
pub struct MerchantListing {
  page_size: u32,
}

impl MerchantListing {
  pub fn new(page_size: u32) -> Self {
    Self { page_size }
  }
}

impl Listing for MerchantListing {
  type Data = ApiResponse<Page<Merchant>>;
  type Item = Merchant;

  fn title(&self) -> String {
    "Merchants".to_string()
  }

  fn query(&self, hooks: &Hooks, page: u32, limit: u32, search: Option<&str>) -> QueryDef<Self::Data> {
    hooks.merchants(page, limit, search)
  }

  fn items<'a>(&self, data: &'a Self::Data) -> &'a [Merchant] {
    &data.data.items
  }

  fn page_info(&self, data: &Self::Data) -> PageInfo {
    data.data.info()
  }

  fn row(&self, m: &Merchant) -> Line<'static> {
    let categories: Vec<&str> = m.category.iter().map(|c| c.name.as_str()).collect();
    Line::from(vec![
      Span::styled(cell(&m.unique_id, 10), Style::default().fg(Color::Cyan)),
      Span::raw(" "),
      Span::raw(cell(&m.name, 28)),
      Span::raw(" "),
      flag("active", m.is_active),
      flag("verified", m.is_verified),
      flag("online", m.is_online),
      flag("featured", m.is_featured),
      Span::styled(cell(&categories.join(", "), 30), Style::default().fg(Color::DarkGray)),
    ])
  }

  fn id(&self, m: &Merchant) -> String {
    m.id.clone()
  }

  fn name(&self, m: &Merchant) -> String {
    m.name.clone()
  }

  fn searchable(&self) -> bool {
    true
  }

  fn deletable(&self) -> bool {
    true
  }

  fn delete(&self, hooks: &Hooks, id: String) -> Option<BoxFuture<'static, ()>> {
    let hooks = hooks.clone();
    Some(async move {
      let _ = hooks.remove_merchant(&id).await;
    }
    .boxed())
  }

  fn open(&self, hooks: &Hooks, m: &Merchant) -> Option<Box<dyn View>> {
    let listing = StoreListing::new(&m.id, &m.name, self.page_size);
    Some(Box::new(PagedView::new(listing, hooks.clone(), self.page_size)))
  }

  fn actions(&self) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new("a/v/o/f", "toggle").with_priority(60),
      ShortcutInfo::new("s", "staff").with_priority(70),
    ]
  }

  fn run_action(&self, key: char, hooks: &Hooks, m: &Merchant) -> Option<RowAction> {
    let hooks = hooks.clone();
    let id = m.id.clone();
    let fut = match key {
      'a' => {
        let status = !m.is_active.unwrap_or_default();
        async move {
          let _ = hooks.toggle_merchant_active(&id, status).await;
        }
        .boxed()
      }
      'v' => {
        let status = !m.is_verified.unwrap_or_default();
        async move {
          let _ = hooks.toggle_merchant_verified(&id, status).await;
        }
        .boxed()
      }
      'o' => {
        let status = !m.is_online.unwrap_or_default();
        async move {
          let _ = hooks.toggle_merchant_online(&id, status).await;
        }
        .boxed()
      }
      'f' => {
        let status = !m.is_featured.unwrap_or_default();
        async move {
          let _ = hooks.toggle_merchant_featured(&id, status).await;
        }
        .boxed()
      }
      's' => {
        let view = PagedView::new(StaffListing::by_merchant(&id, &m.name), hooks, self.page_size);
        return Some(RowAction::Open(Box::new(view)));
      }
      _ => return None,
    };
    Some(RowAction::Spawn(fut))
  }
}

/// Merchant categories. The backend returns them all at once.
pub struct CategoryListing;

impl Listing for CategoryListing {
  type Data = ApiResponse<Categories>;
  type Item = Category;

  fn title(&self) -> String {
    "Categories".to_string()
  }

  fn query(&self, hooks: &Hooks, _page: u32, _limit: u32, _search: Option<&str>) -> QueryDef<Self::Data> {
    hooks.merchant_categories()
  }

  fn items<'a>(&self, data: &'a Self::Data) -> &'a [Category] {
    &data.data.categories
  }

  fn page_info(&self, data: &Self::Data) -> PageInfo {
    PageInfo {
      page: 1,
      total_pages: 1,
      total: data.data.categories.len() as u64,
    }
  }

  fn row(&self, c: &Category) -> Line<'static> {
    Line::from(vec![
      Span::raw(cell(&c.name, 30)),
      Span::styled(
        c.image.as_ref().map(|i| i.path.clone()).unwrap_or_default(),
        Style::default().fg(Color::DarkGray),
      ),
    ])
  }

  fn id(&self, c: &Category) -> String {
    c.id.clone()
  }

  fn name(&self, c: &Category) -> String {
    c.name.clone()
  }

  fn deletable(&self) -> bool {
    true
  }

  fn delete(&self, hooks: &Hooks, id: String) -> Option<BoxFuture<'static, ()>> {
    let hooks = hooks.clone();
    Some(async move {
      let _ = hooks.delete_merchant_category(&id).await;
    }
    .boxed())
  }
}

/// Store locations of one merchant. Enter opens the store's staff.
pub struct StoreListing {
  merchant_id: String,
  merchant_name: String,
  page_size: u32,
}

impl StoreListing {
  pub fn new(merchant_id: &str, merchant_name: &str, page_size: u32) -> Self {
    Self {
      merchant_id: merchant_id.to_string(),
      merchant_name: merchant_name.to_string(),
      page_size,
    }
  }
}

impl Listing for StoreListing {
  type Data = ApiResponse<Page<StoreLocation>>;
  type Item = StoreLocation;

  fn title(&self) -> String {
    format!("Stores [{}]", self.merchant_name)
  }

  fn query(&self, hooks: &Hooks, page: u32, limit: u32, _search: Option<&str>) -> QueryDef<Self::Data> {
    hooks.store_locations(&self.merchant_id, page, limit)
  }

  fn items<'a>(&self, data: &'a Self::Data) -> &'a [StoreLocation] {
    &data.data.items
  }

  fn page_info(&self, data: &Self::Data) -> PageInfo {
    data.data.info()
  }

  fn row(&self, s: &StoreLocation) -> Line<'static> {
    Line::from(vec![
      Span::styled(cell(&s.unique_id, 10), Style::default().fg(Color::Cyan)),
      Span::raw(" "),
      Span::raw(cell(&s.name, 28)),
      Span::raw(" "),
      flag("active", s.is_active),
      flag("verified", s.is_verified),
      Span::styled(
        format!("{}, {}", s.address.city, s.address.state),
        Style::default().fg(Color::DarkGray),
      ),
    ])
  }

  fn id(&self, s: &StoreLocation) -> String {
    s.id.clone()
  }

  fn name(&self, s: &StoreLocation) -> String {
    s.name.clone()
  }

  fn deletable(&self) -> bool {
    true
  }

  fn delete(&self, hooks: &Hooks, id: String) -> Option<BoxFuture<'static, ()>> {
    let hooks = hooks.clone();
    Some(async move {
      let _ = hooks.remove_store_location(&id).await;
    }
    .boxed())
  }

  fn open(&self, hooks: &Hooks, s: &StoreLocation) -> Option<Box<dyn View>> {
    let listing = StaffListing::by_store(&s.id, &s.name);
    Some(Box::new(PagedView::new(listing, hooks.clone(), self.page_size)))
  }

  fn actions(&self) -> Vec<ShortcutInfo> {
    vec![ShortcutInfo::new("a/v", "toggle").with_priority(60)]
  }

  fn run_action(&self, key: char, hooks: &Hooks, s: &StoreLocation) -> Option<RowAction> {
    let hooks = hooks.clone();
    let id = s.id.clone();
    let fut = match key {
      'a' => {
        let status = !s.is_active.unwrap_or_default();
        async move {
          let _ = hooks.toggle_store_location_active(&id, status).await;
        }
        .boxed()
      }
      'v' => {
        let status = !s.is_verified.unwrap_or_default();
        async move {
          let _ = hooks.toggle_store_location_verified(&id, status).await;
        }
        .boxed()
      }
      _ => return None,
    };
    Some(RowAction::Spawn(fut))
  }
}
