use futures::future::BoxFuture;
use futures::FutureExt;
use ratatui::prelude::*;

use super::paged::{Listing, PagedView};
use crate::api::types::{ApiResponse, OffsetPagination, Page, PageInfo, Paginator, Subject, Topic};
use crate::hooks::Hooks;
use crate::query::QueryDef;
use crate::ui::renderfns::cell;
use crate::ui::view::View;

type SubjectPage = ApiResponse<Page<Subject, OffsetPagination>>;
type TopicPage = ApiResponse<Page<Topic, OffsetPagination>>;

/// The subject endpoints page by record offset: page `n` of size `limit`
/// starts at `(n - 1) * limit`.
fn offset(page: u32, limit: u32) -> u32 {
  page.saturating_sub(1).saturating_mul(limit)
}

pub struct SubjectListing {
  page_size: u32,
}

impl SubjectListing {
  pub fn new(page_size: u32) -> Self {
    Self { page_size }
  }
}

impl Listing for SubjectListing {
  type Data = SubjectPage;
  type Item = Subject;

  fn title(&self) -> String {
    "Subjects".to_string()
  }

  fn query(&self, hooks: &Hooks, page: u32, limit: u32, _search: Option<&str>) -> QueryDef<Self::Data> {
    hooks.subjects(offset(page, limit), limit)
  }

  fn items<'a>(&self, data: &'a Self::Data) -> &'a [Subject] {
    &data.data.items
  }

  fn page_info(&self, data: &Self::Data) -> PageInfo {
    data.data.info()
  }

  fn row(&self, s: &Subject) -> Line<'static> {
    Line::from(vec![
      Span::raw(cell(&s.name, 36)),
      Span::styled(format!("{} topics", s.topics.len()), Style::default().fg(Color::DarkGray)),
    ])
  }

  fn id(&self, s: &Subject) -> String {
    s.id.clone()
  }

  fn name(&self, s: &Subject) -> String {
    s.name.clone()
  }

  fn deletable(&self) -> bool {
    true
  }

  fn delete(&self, hooks: &Hooks, id: String) -> Option<BoxFuture<'static, ()>> {
    let hooks = hooks.clone();
    Some(
      async move {
        let _ = hooks.remove_subject(&id).await;
      }
      .boxed(),
    )
  }

  fn open(&self, hooks: &Hooks, s: &Subject) -> Option<Box<dyn View>> {
    let listing = TopicListing::new(&s.id, &s.name);
    Some(Box::new(PagedView::new(listing, hooks.clone(), self.page_size)))
  }
}

pub struct TopicListing {
  subject_id: String,
  subject_name: String,
}

impl TopicListing {
  pub fn new(subject_id: &str, subject_name: &str) -> Self {
    Self {
      subject_id: subject_id.to_string(),
      subject_name: subject_name.to_string(),
    }
  }
}

impl Listing for TopicListing {
  type Data = TopicPage;
  type Item = Topic;

  fn title(&self) -> String {
    format!("Topics [{}]", self.subject_name)
  }

  fn query(&self, hooks: &Hooks, page: u32, limit: u32, _search: Option<&str>) -> QueryDef<Self::Data> {
    hooks.topics(&self.subject_id, offset(page, limit), limit)
  }

  fn items<'a>(&self, data: &'a Self::Data) -> &'a [Topic] {
    &data.data.items
  }

  fn page_info(&self, data: &Self::Data) -> PageInfo {
    data.data.info()
  }

  fn row(&self, t: &Topic) -> Line<'static> {
    Line::raw(t.name.clone())
  }

  fn id(&self, t: &Topic) -> String {
    t.id.clone()
  }

  fn name(&self, t: &Topic) -> String {
    t.name.clone()
  }

  fn deletable(&self) -> bool {
    true
  }

  fn delete(&self, hooks: &Hooks, id: String) -> Option<BoxFuture<'static, ()>> {
    let hooks = hooks.clone();
    Some(
      async move {
        let _ = hooks.remove_topic(&id).await;
      }
      .boxed(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::hooks::keys;
  use crate::hooks::test_support::fixture;
  use serde_json::json;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, ResponseTemplate};

  #[tokio::test]
  async fn test_first_page_requests_offset_zero() {
    let fx = fixture().await;
    Mock::given(method("GET"))
      .and(path("/v1/api/subject/"))
      .and(query_param("page_offset", "0"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "data": {
          "subjects": [{ "_id": "sub1", "name": "Physics" }],
          "pagination": { "index": 0, "limit": 10, "offset": 0, "count": 1, "pages": 1 }
        }
      })))
      .expect(1)
      .mount(&fx.server)
      .await;

    let mut view = PagedView::new(SubjectListing::new(10), fx.hooks.clone(), 10);
    view.settled().await;

    let data = fx.hooks.queries().query_data::<SubjectPage>(&keys::subjects(0, 10)).unwrap();
    let info = SubjectListing::new(10).page_info(&data);
    assert_eq!((info.page, info.total_pages), (1, 1));
  }

  #[test]
  fn test_offset_counts_records() {
    assert_eq!(offset(1, 10), 0);
    assert_eq!(offset(2, 10), 10);
    assert_eq!(offset(3, 25), 50);
    assert_eq!(offset(0, 10), 0);
  }

  #[tokio::test]
  async fn test_second_page_requests_record_offset() {
    let fx = fixture().await;
    Mock::given(method("GET"))
      .and(path("/v1/api/subject/"))
      .and(query_param("page_offset", "10"))
      .and(query_param("limit", "10"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "data": {
          "subjects": [{ "_id": "sub11", "name": "Zoology" }],
          "pagination": { "index": 1, "limit": 10, "offset": 10, "count": 11, "pages": 2 }
        }
      })))
      .expect(1)
      .mount(&fx.server)
      .await;

    let def = SubjectListing::new(10).query(&fx.hooks, 2, 10, None);
    assert_eq!(def.key, keys::subjects(10, 10));

    let topics = TopicListing::new("sub1", "Physics").query(&fx.hooks, 3, 10, None);
    assert_eq!(topics.key, keys::topics("sub1", 20, 10));

    let mut observer = fx.hooks.observe(def);
    observer.mount();
    observer.settled().await;
    let data = fx.hooks.queries().query_data::<SubjectPage>(&keys::subjects(10, 10)).unwrap();
    let info = SubjectListing::new(10).page_info(&data);
    assert_eq!((info.page, info.total_pages), (2, 2));
  }
}
