use futures::future::BoxFuture;
use futures::FutureExt;
use ratatui::prelude::*;

use super::paged::Listing;
use crate::api::types::{ApiResponse, Institution, Page, PageInfo, Paginator};
use crate::hooks::Hooks;
use crate::query::QueryDef;
use crate::ui::renderfns::{cell, flag};

pub struct InstitutionListing;

impl Listing for InstitutionListing {
  type Data = ApiResponse<Page<Institution>>;
  type Item = Institution;

  fn title(&self) -> String {
    "Institutions".to_string()
  }

  fn query(&self, hooks: &Hooks, page: u32, limit: u32, _search: Option<&str>) -> QueryDef<Self::Data> {
    hooks.institutions(page, limit)
  }

  fn items<'a>(&self, data: &'a Self::Data) -> &'a [Institution] {
    &data.data.items
  }

  fn page_info(&self, data: &Self::Data) -> PageInfo {
    data.data.info()
  }

  fn row(&self, i: &Institution) -> Line<'static> {
    let city = i.address.as_ref().map(|a| a.city.clone()).unwrap_or_default();
    Line::from(vec![
      Span::raw(cell(&i.name, 36)),
      Span::raw(" "),
      flag("verified", Some(i.is_verified)),
      Span::styled(cell(i.board.as_deref().unwrap_or_default(), 12), Style::default().fg(Color::Yellow)),
      Span::raw(" "),
      Span::styled(city, Style::default().fg(Color::DarkGray)),
    ])
  }

  fn id(&self, i: &Institution) -> String {
    i.id.clone()
  }

  fn name(&self, i: &Institution) -> String {
    i.name.clone()
  }

  fn deletable(&self) -> bool {
    true
  }

  fn delete(&self, hooks: &Hooks, id: String) -> Option<BoxFuture<'static, ()>> {
    let hooks = hooks.clone();
    Some(
      async move {
        let _ = hooks.delete_institution(&id).await;
      }
      .boxed(),
    )
  }
}
