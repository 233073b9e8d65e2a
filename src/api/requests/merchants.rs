use serde_json::json;

use crate::api::types::{
  ApiResponse, Categories, Category, CategoryRequest, Merchant, MerchantRequest, Page, Single,
};
use crate::api::{check_page, Api, ApiError, Body, QueryParams, RequestOptions};

const MERCHANTS: &str = "/api/merchants";
const CATEGORIES: &str = "/api/merchant-category";

type MerchantResponse = ApiResponse<Single<Merchant>>;
type CategoryResponse = ApiResponse<Single<Category>>;

impl Api {
  pub async fn create_merchant(&self, data: &MerchantRequest) -> Result<MerchantResponse, ApiError> {
    self
      .http()
      .post(MERCHANTS, Body::json(data)?, RequestOptions::new())
      .await
  }

  pub async fn update_merchant(&self, merchant_id: &str, data: &MerchantRequest) -> Result<MerchantResponse, ApiError> {
    let path = format!("{}/{}", MERCHANTS, merchant_id);
    self.http().put(&path, Body::json(data)?, RequestOptions::new()).await
  }

  /// List merchants. `search` is sent only when non-empty.
  pub async fn fetch_merchants(
    &self,
    page: u32,
    limit: u32,
    search: Option<&str>,
  ) -> Result<ApiResponse<Page<Merchant>>, ApiError> {
    let path = QueryParams::new()
      .add("page", page)
      .add("limit", limit)
      .add_non_empty("search", search)
      .apply(MERCHANTS);
    let response: ApiResponse<Page<Merchant>> = self.http().get(&path, RequestOptions::new()).await?;
    check_page(&path, &response.data);
    Ok(response)
  }

  pub async fn fetch_merchant(&self, merchant_id: &str) -> Result<MerchantResponse, ApiError> {
    let path = format!("{}/{}", MERCHANTS, merchant_id);
    self.http().get(&path, RequestOptions::new()).await
  }

  pub async fn remove_merchant(&self, merchant_id: &str) -> Result<MerchantResponse, ApiError> {
    let path = format!("{}/{}", MERCHANTS, merchant_id);
    self.http().delete(&path, Body::Empty, RequestOptions::new()).await
  }

  pub async fn toggle_merchant_active(&self, merchant_id: &str, status: bool) -> Result<MerchantResponse, ApiError> {
    let path = format!("{}/{}/toggle-status", MERCHANTS, merchant_id);
    self
      .http()
      .post(&path, Body::Json(json!({ "isActive": status })), RequestOptions::new())
      .await
  }

  pub async fn toggle_merchant_verified(&self, merchant_id: &str, status: bool) -> Result<MerchantResponse, ApiError> {
    let path = format!("{}/{}/verified-toggler", MERCHANTS, merchant_id);
    self
      .http()
      .put(&path, Body::Json(json!({ "isVerified": status })), RequestOptions::new())
      .await
  }

  pub async fn toggle_merchant_online(&self, merchant_id: &str, status: bool) -> Result<MerchantResponse, ApiError> {
    let path = format!("{}/{}/online-toggler", MERCHANTS, merchant_id);
    self
      .http()
      .put(&path, Body::Json(json!({ "isOnline": status })), RequestOptions::new())
      .await
  }

  pub async fn toggle_merchant_featured(&self, merchant_id: &str, status: bool) -> Result<MerchantResponse, ApiError> {
    let path = format!("{}/{}/featured-toggler", MERCHANTS, merchant_id);
    self
      .http()
      .put(&path, Body::Json(json!({ "isFeatured": status })), RequestOptions::new())
      .await
  }

  pub async fn add_category_to_merchant(
    &self,
    merchant_id: &str,
    category_id: &str,
  ) -> Result<MerchantResponse, ApiError> {
    let body = json!({ "merchantId": merchant_id, "categoryId": category_id });
    self
      .http()
      .post(
        &format!("{}/add-category", CATEGORIES),
        Body::Json(body),
        RequestOptions::new(),
      )
      .await
  }

  pub async fn fetch_merchant_categories(&self) -> Result<ApiResponse<Categories>, ApiError> {
    self.http().get(CATEGORIES, RequestOptions::new()).await
  }

  pub async fn create_merchant_category(&self, data: &CategoryRequest) -> Result<CategoryResponse, ApiError> {
    self
      .http()
      .post(CATEGORIES, Body::json(data)?, RequestOptions::new())
      .await
  }

  pub async fn delete_merchant_category(&self, category_id: &str) -> Result<CategoryResponse, ApiError> {
    let path = format!("{}/{}", CATEGORIES, category_id);
    self.http().delete(&path, Body::Empty, RequestOptions::new()).await
  }
}
