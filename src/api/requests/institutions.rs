use crate::api::types::{ApiResponse, Institution, InstitutionRequest, Page, Single};
use crate::api::{check_page, Api, ApiError, Body, QueryParams, RequestOptions};

const BASE_URL: &str = "/api/institutions";

impl Api {
  pub async fn fetch_institutions(&self, page: u32, limit: u32) -> Result<ApiResponse<Page<Institution>>, ApiError> {
    let path = QueryParams::new()
      .add("page", page)
      .add("limit", limit)
      .apply(BASE_URL);
    let response: ApiResponse<Page<Institution>> = self.http().get(&path, RequestOptions::new()).await?;
    check_page(&path, &response.data);
    Ok(response)
  }

  pub async fn create_institution(
    &self,
    data: &InstitutionRequest,
  ) -> Result<ApiResponse<Single<Institution>>, ApiError> {
    self
      .http()
      .post(BASE_URL, Body::json(data)?, RequestOptions::new())
      .await
  }

  pub async fn delete_institution(&self, institution_id: &str) -> Result<ApiResponse<Single<Institution>>, ApiError> {
    let path = format!("{}/{}", BASE_URL, institution_id);
    self.http().delete(&path, Body::Empty, RequestOptions::new()).await
  }
}

#[cfg(test)]
mod tests {
  use crate::api::requests::test_support::{api, page};
  use serde_json::json;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  #[tokio::test]
  async fn test_fetch_and_delete_institution() {
    let server = MockServer::start().await;
    let record = json!({ "_id": "i1", "name": "IIT Bombay", "isVerified": true });
    Mock::given(method("GET"))
      .and(path("/api/institutions"))
      .and(query_param("page", "3"))
      .respond_with(ResponseTemplate::new(200).set_body_json(page("institutions", json!([record.clone()]))))
      .expect(1)
      .mount(&server)
      .await;
    Mock::given(method("DELETE"))
      .and(path("/api/institutions/i1"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "institution": record } })))
      .expect(1)
      .mount(&server)
      .await;

    let api = api(&server);
    let list = api.fetch_institutions(3, 10).await.unwrap();
    assert!(list.data.items[0].is_verified);
    let deleted = api.delete_institution("i1").await.unwrap();
    assert_eq!(deleted.data.item.name, "IIT Bombay");
  }
}
