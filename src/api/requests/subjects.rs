//! Subject and topic endpoints. These live on the versioned subtree and page
//! with a record offset, `page_offset`, instead of `page`.

use crate::api::types::{ApiResponse, NameRequest, OffsetPagination, Page, Single, Subject, Topic};
use crate::api::{check_page, Api, ApiError, Body, QueryParams, RequestOptions};

const BASE_URL: &str = "/v1/api/subject";

impl Api {
  pub async fn create_subject(&self, name: &str) -> Result<ApiResponse<Single<Subject>>, ApiError> {
    let body = Body::json(&NameRequest { name: name.to_string() })?;
    self
      .http()
      .post(&format!("{}/create/", BASE_URL), body, RequestOptions::new())
      .await
  }

  pub async fn fetch_subjects(
    &self,
    offset: u32,
    limit: u32,
  ) -> Result<ApiResponse<Page<Subject, OffsetPagination>>, ApiError> {
    let path = QueryParams::new()
      .add("page_offset", offset)
      .add("limit", limit)
      .apply(&format!("{}/", BASE_URL));
    let response: ApiResponse<Page<Subject, OffsetPagination>> =
      self.http().get(&path, RequestOptions::new()).await?;
    check_page(&path, &response.data);
    Ok(response)
  }

  pub async fn update_subject(&self, subject_id: &str, name: &str) -> Result<ApiResponse<Single<Subject>>, ApiError> {
    let body = Body::json(&NameRequest { name: name.to_string() })?;
    self
      .http()
      .put(&format!("{}/{}/update/", BASE_URL, subject_id), body, RequestOptions::new())
      .await
  }

  pub async fn remove_subject(&self, subject_id: &str) -> Result<ApiResponse<Single<Subject>>, ApiError> {
    self
      .http()
      .delete(
        &format!("{}/{}/delete/", BASE_URL, subject_id),
        Body::Empty,
        RequestOptions::new(),
      )
      .await
  }

  pub async fn create_topic(&self, subject_id: &str, name: &str) -> Result<ApiResponse<Single<Topic>>, ApiError> {
    let body = Body::json(&NameRequest { name: name.to_string() })?;
    self
      .http()
      .post(
        &format!("{}/{}/topic/create/", BASE_URL, subject_id),
        body,
        RequestOptions::new(),
      )
      .await
  }

  pub async fn fetch_topics(
    &self,
    subject_id: &str,
    offset: u32,
    limit: u32,
  ) -> Result<ApiResponse<Page<Topic, OffsetPagination>>, ApiError> {
    let path = QueryParams::new()
      .add("page_offset", offset)
      .add("limit", limit)
      .apply(&format!("{}/{}/topics/", BASE_URL, subject_id));
    let response: ApiResponse<Page<Topic, OffsetPagination>> = self.http().get(&path, RequestOptions::new()).await?;
    check_page(&path, &response.data);
    Ok(response)
  }

  pub async fn update_topic(&self, topic_id: &str, name: &str) -> Result<ApiResponse<Single<Topic>>, ApiError> {
    let body = Body::json(&NameRequest { name: name.to_string() })?;
    self
      .http()
      .put(&format!("{}/topic/{}/update/", BASE_URL, topic_id), body, RequestOptions::new())
      .await
  }

  pub async fn remove_topic(&self, topic_id: &str) -> Result<ApiResponse<Single<Topic>>, ApiError> {
    self
      .http()
      .delete(
        &format!("{}/topic/{}/delete/", BASE_URL, topic_id),
        Body::Empty,
        RequestOptions::new(),
      )
      .await
  }
}

#[cfg(test)]
mod tests {
  use crate::api::requests::test_support::api;
  use serde_json::json;
  use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  #[tokio::test]
  async fn test_subjects_use_page_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/v1/api/subject/"))
      .and(query_param("page_offset", "0"))
      .and(query_param("limit", "10"))
      .and(query_param_is_missing("page"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "data": {
          "subjects": [{ "_id": "sub1", "name": "Physics", "topics": [] }],
          "pagination": { "index": 0, "previous": null, "next": 10, "limit": 10, "offset": 0, "count": 12, "pages": 2 }
        }
      })))
      .expect(1)
      .mount(&server)
      .await;

    let response = api(&server).fetch_subjects(0, 10).await.unwrap();
    assert_eq!(response.data.items[0].name, "Physics");
    assert_eq!(response.data.info().page, 1);
    assert_eq!(response.data.pagination.next, Some(10));
  }

  #[tokio::test]
  async fn test_topic_mutation_paths() {
    let server = MockServer::start().await;
    let topic = json!({ "data": { "topic": { "_id": "t1", "name": "Optics", "subject": "sub1" } } });
    Mock::given(method("POST"))
      .and(path("/v1/api/subject/sub1/topic/create/"))
      .and(body_json(json!({ "name": "Optics" })))
      .respond_with(ResponseTemplate::new(201).set_body_json(topic.clone()))
      .expect(1)
      .mount(&server)
      .await;
    Mock::given(method("PUT"))
      .and(path("/v1/api/subject/topic/t1/update/"))
      .and(body_json(json!({ "name": "Wave optics" })))
      .respond_with(ResponseTemplate::new(200).set_body_json(topic.clone()))
      .expect(1)
      .mount(&server)
      .await;
    Mock::given(method("DELETE"))
      .and(path("/v1/api/subject/topic/t1/delete/"))
      .respond_with(ResponseTemplate::new(200).set_body_json(topic))
      .expect(1)
      .mount(&server)
      .await;

    let api = api(&server);
    let created = api.create_topic("sub1", "Optics").await.unwrap();
    assert_eq!(created.data.item.subject, "sub1");
    api.update_topic("t1", "Wave optics").await.unwrap();
    api.remove_topic("t1").await.unwrap();
  }
}
