use serde_json::json;

use crate::api::types::{ApiResponse, Page, Single, StoreLocation, StoreLocationRequest};
use crate::api::{check_page, Api, ApiError, Body, QueryParams, RequestOptions};

const BASE_URL: &str = "/api/merchants";

type StoreResponse = ApiResponse<Single<StoreLocation>>;

impl Api {
  pub async fn create_store_location(
    &self,
    merchant_id: &str,
    data: &StoreLocationRequest,
  ) -> Result<StoreResponse, ApiError> {
    let path = format!("{}/{}/store", BASE_URL, merchant_id);
    self.http().post(&path, Body::json(data)?, RequestOptions::new()).await
  }

  pub async fn fetch_store_locations(
    &self,
    merchant_id: &str,
    page: u32,
    limit: u32,
  ) -> Result<ApiResponse<Page<StoreLocation>>, ApiError> {
    let path = QueryParams::new()
      .add("page", page)
      .add("limit", limit)
      .apply(&format!("{}/{}/store", BASE_URL, merchant_id));
    let response: ApiResponse<Page<StoreLocation>> = self.http().get(&path, RequestOptions::new()).await?;
    check_page(&path, &response.data);
    Ok(response)
  }

  pub async fn fetch_store_location(&self, store_id: &str) -> Result<StoreResponse, ApiError> {
    let path = format!("{}/stores/{}", BASE_URL, store_id);
    self.http().get(&path, RequestOptions::new()).await
  }

  pub async fn remove_store_location(&self, store_id: &str) -> Result<StoreResponse, ApiError> {
    let path = format!("{}/store/{}", BASE_URL, store_id);
    self.http().delete(&path, Body::Empty, RequestOptions::new()).await
  }

  pub async fn toggle_store_location_active(&self, store_id: &str, status: bool) -> Result<StoreResponse, ApiError> {
    let path = format!("{}/stores/{}/active-toggler", BASE_URL, store_id);
    self
      .http()
      .put(&path, Body::Json(json!({ "isActive": status })), RequestOptions::new())
      .await
  }

  pub async fn toggle_store_location_verified(&self, store_id: &str, status: bool) -> Result<StoreResponse, ApiError> {
    let path = format!("{}/stores/{}/verified-toggler", BASE_URL, store_id);
    self
      .http()
      .put(&path, Body::Json(json!({ "isVerified": status })), RequestOptions::new())
      .await
  }
}

#[cfg(test)]
mod tests {
  use crate::api::requests::test_support::{api, page};
  use serde_json::json;
  use wiremock::matchers::{body_json, method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn store(id: &str) -> serde_json::Value {
    json!({
      "_id": id,
      "name": "Koramangala",
      "address": {
        "formattedAddress": "80 Feet Rd",
        "city": "Bengaluru",
        "state": "KA",
        "country": "IN",
        "coordinates": { "lat": 12.93, "lng": 77.62 }
      }
    })
  }

  #[tokio::test]
  async fn test_store_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/merchants/m1/store"))
      .and(query_param("page", "1"))
      .and(query_param("limit", "5"))
      .respond_with(ResponseTemplate::new(200).set_body_json(page("merchantStoreLocations", json!([store("st1")]))))
      .expect(1)
      .mount(&server)
      .await;
    Mock::given(method("GET"))
      .and(path("/api/merchants/stores/st1"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "merchantStore": store("st1") } })))
      .expect(1)
      .mount(&server)
      .await;
    Mock::given(method("DELETE"))
      .and(path("/api/merchants/store/st1"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "merchantStore": store("st1") } })))
      .expect(1)
      .mount(&server)
      .await;
    Mock::given(method("PUT"))
      .and(path("/api/merchants/stores/st1/active-toggler"))
      .and(body_json(json!({ "isActive": false })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "merchantStore": store("st1") } })))
      .expect(1)
      .mount(&server)
      .await;

    let api = api(&server);
    let list = api.fetch_store_locations("m1", 1, 5).await.unwrap();
    assert_eq!(list.data.items[0].address.city, "Bengaluru");
    api.fetch_store_location("st1").await.unwrap();
    api.remove_store_location("st1").await.unwrap();
    api.toggle_store_location_active("st1", false).await.unwrap();
  }
}
