use ratatui::prelude::*;

use super::paged::Listing;
use crate::api::types::{ApiResponse, MerchantStaff, Page, PageInfo, Paginator, StaffRole};
use crate::hooks::Hooks;
use crate::query::QueryDef;
use crate::ui::renderfns::cell;

enum Scope {
  All,
  Merchant { id: String, name: String },
  Store { id: String, name: String },
}

/// Merchant staff, either everyone or those of one merchant or store.
pub struct StaffListing {
  scope: Scope,
}

impl StaffListing {
  pub fn all() -> Self {
    Self { scope: Scope::All }
  }

  pub fn by_merchant(merchant_id: &str, merchant_name: &str) -> Self {
    Self {
      scope: Scope::Merchant {
        id: merchant_id.to_string(),
        name: merchant_name.to_string(),
      },
    }
  }

  pub fn by_store(store_id: &str, store_name: &str) -> Self {
    Self {
      scope: Scope::Store {
        id: store_id.to_string(),
        name: store_name.to_string(),
      },
    }
  }
}

fn role_label(role: StaffRole) -> &'static str {
  match role {
    StaffRole::Owner => "owner",
    StaffRole::Manager => "manager",
    StaffRole::Staff => "staff",
  }
}

impl Listing for StaffListing {
  type Data = ApiResponse<Page<MerchantStaff>>;
  type Item = MerchantStaff;

  fn title(&self) -> String {
    match &self.scope {
      Scope::All => "Staff".to_string(),
      Scope::Merchant { name, .. } | Scope::Store { name, .. } => format!("Staff [{}]", name),
    }
  }

  // Scoped lists are not paginated by the backend
  fn query(&self, hooks: &Hooks, page: u32, limit: u32, _search: Option<&str>) -> QueryDef<Self::Data> {
    match &self.scope {
      Scope::All => hooks.merchant_staffs(page, limit),
      Scope::Merchant { id, .. } => hooks.merchant_staffs_by_merchant(id),
      Scope::Store { id, .. } => hooks.merchant_staffs_by_store(id),
    }
  }

  fn items<'a>(&self, data: &'a Self::Data) -> &'a [MerchantStaff] {
    &data.data.items
  }

  fn page_info(&self, data: &Self::Data) -> PageInfo {
    data.data.info()
  }

  fn row(&self, s: &MerchantStaff) -> Line<'static> {
    Line::from(vec![
      Span::raw(cell(&self.name(s), 24)),
      Span::raw(" "),
      Span::styled(cell(role_label(s.role), 8), Style::default().fg(Color::Yellow)),
      Span::raw(" "),
      Span::raw(cell(&s.email, 32)),
      Span::styled(
        s.merchant_name().unwrap_or_default().to_string(),
        Style::default().fg(Color::DarkGray),
      ),
    ])
  }

  fn id(&self, s: &MerchantStaff) -> String {
    s.id.clone()
  }

  fn name(&self, s: &MerchantStaff) -> String {
    match &s.last_name {
      Some(last) if !last.is_empty() => format!("{} {}", s.first_name, last),
      _ => s.first_name.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::hooks::test_support::fixture;
  use crate::ui::views::paged::PagedView;
  use serde_json::json;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, ResponseTemplate};

  #[tokio::test]
  async fn test_store_scope_reads_store_staff() {
    let fx = fixture().await;
    Mock::given(method("GET"))
      .and(path("/api/merchant-staff/store/s1"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "data": {
          "allStaffsOfAMerchantStore": [
            { "_id": "u1", "firstName": "Asha", "lastName": "Rao", "email": "asha@tea.in", "role": "MANAGER" }
          ],
          "pagination": { "page": 1, "limit": 10, "totalPages": 1, "totalDocs": 1 }
        }
      })))
      .expect(1)
      .mount(&fx.server)
      .await;

    let listing = StaffListing::by_store("s1", "Indiranagar");
    assert_eq!(listing.title(), "Staff [Indiranagar]");
    let mut view = PagedView::new(listing, fx.hooks.clone(), 10);
    view.settled().await;

    let staff = StaffListing::all();
    let data = fx
      .hooks
      .queries()
      .query_data::<ApiResponse<Page<MerchantStaff>>>(&crate::hooks::keys::staffs_by_store("s1"))
      .unwrap();
    assert_eq!(staff.name(&data.data.items[0]), "Asha Rao");
  }
}
