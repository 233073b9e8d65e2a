use crate::api::types::{ApiResponse, MerchantStaff, Page, Single, StaffRequest};
use crate::api::{check_page, Api, ApiError, Body, QueryParams, RequestOptions};

const BASE_URL: &str = "/api/merchant-staff";

type StaffPage = ApiResponse<Page<MerchantStaff>>;

impl Api {
  pub async fn fetch_merchant_staffs(&self, page: u32, limit: u32) -> Result<StaffPage, ApiError> {
    let path = QueryParams::new()
      .add("page", page)
      .add("limit", limit)
      .apply(BASE_URL);
    let response: StaffPage = self.http().get(&path, RequestOptions::new()).await?;
    check_page(&path, &response.data);
    Ok(response)
  }

  pub async fn fetch_merchant_staffs_by_merchant(&self, merchant_id: &str) -> Result<StaffPage, ApiError> {
    let path = format!("{}/merchant/{}", BASE_URL, merchant_id);
    self.http().get(&path, RequestOptions::new()).await
  }

  pub async fn fetch_merchant_staffs_by_store(&self, store_id: &str) -> Result<StaffPage, ApiError> {
    let path = format!("{}/store/{}", BASE_URL, store_id);
    self.http().get(&path, RequestOptions::new()).await
  }

  pub async fn create_staff_for_merchant(
    &self,
    merchant_id: &str,
    payload: &StaffRequest,
  ) -> Result<ApiResponse<Single<MerchantStaff>>, ApiError> {
    let path = format!("{}/merchant/{}", BASE_URL, merchant_id);
    self
      .http()
      .post(&path, Body::json(payload)?, RequestOptions::new())
      .await
  }

  pub async fn create_staff_for_store(
    &self,
    store_id: &str,
    payload: &StaffRequest,
  ) -> Result<ApiResponse<Single<MerchantStaff>>, ApiError> {
    let path = format!("{}/merchant/store/{}", BASE_URL, store_id);
    self
      .http()
      .post(&path, Body::json(payload)?, RequestOptions::new())
      .await
  }
}

#[cfg(test)]
mod tests {
  use crate::api::requests::test_support::{api, page};
  use crate::api::types::{StaffRequest, StaffRole};
  use serde_json::json;
  use wiremock::matchers::{body_json, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn staff(id: &str) -> serde_json::Value {
    json!({
      "_id": id,
      "firstName": "Ravi",
      "email": "ravi@example.com",
      "role": "OWNER",
      "merchant": { "_id": "m1", "name": "Chai Point" }
    })
  }

  #[tokio::test]
  async fn test_staff_lists_read_each_list_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/merchant-staff/merchant/m1"))
      .respond_with(ResponseTemplate::new(200).set_body_json(page("allStaffsOfAMerchant", json!([staff("s1")]))))
      .mount(&server)
      .await;
    Mock::given(method("GET"))
      .and(path("/api/merchant-staff/store/st1"))
      .respond_with(ResponseTemplate::new(200).set_body_json(page("allStaffsOfAMerchantStore", json!([staff("s2")]))))
      .mount(&server)
      .await;

    let api = api(&server);
    let by_merchant = api.fetch_merchant_staffs_by_merchant("m1").await.unwrap();
    assert_eq!(by_merchant.data.items[0].merchant_name(), Some("Chai Point"));
    assert_eq!(by_merchant.data.items[0].role, StaffRole::Owner);

    let by_store = api.fetch_merchant_staffs_by_store("st1").await.unwrap();
    assert_eq!(by_store.data.items[0].id, "s2");
  }

  #[tokio::test]
  async fn test_create_staff_for_store_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/api/merchant-staff/merchant/store/st1"))
      .and(body_json(json!({ "firstName": "Ravi", "email": "ravi@example.com", "role": "MANAGER" })))
      .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": { "staff": staff("s3") } })))
      .expect(1)
      .mount(&server)
      .await;

    let created = api(&server)
      .create_staff_for_store(
        "st1",
        &StaffRequest {
          first_name: "Ravi".into(),
          last_name: None,
          email: "ravi@example.com".into(),
          role: StaffRole::Manager,
        },
      )
      .await
      .unwrap();
    assert_eq!(created.data.item.id, "s3");
  }
}
