use serde_json::json;

use crate::api::types::{ApiResponse, Page, Single, SocialEvent, SocialEventRequest, SocialEventTransaction};
use crate::api::{check_page, Api, ApiError, Body, QueryParams, RequestOptions};

const BASE_URL: &str = "/api/social-events";

impl Api {
  pub async fn create_social_event(
    &self,
    data: &SocialEventRequest,
  ) -> Result<ApiResponse<Single<SocialEvent>>, ApiError> {
    self
      .http()
      .post(BASE_URL, Body::json(data)?, RequestOptions::new())
      .await
  }

  pub async fn fetch_social_events(&self, page: u32, limit: u32) -> Result<ApiResponse<Page<SocialEvent>>, ApiError> {
    let path = QueryParams::new()
      .add("page", page)
      .add("limit", limit)
      .apply(BASE_URL);
    let response: ApiResponse<Page<SocialEvent>> = self.http().get(&path, RequestOptions::new()).await?;
    check_page(&path, &response.data);
    Ok(response)
  }

  /// Transactions for one event. Each filter is sent only when given.
  pub async fn fetch_social_event_transactions(
    &self,
    event_id: &str,
    page: Option<u32>,
    limit: Option<u32>,
    is_valid: Option<bool>,
  ) -> Result<ApiResponse<Page<SocialEventTransaction>>, ApiError> {
    let path = QueryParams::new()
      .add_opt("page", page)
      .add_opt("limit", limit)
      .add_opt("isValid", is_valid)
      .apply(&format!("{}/{}/transactions", BASE_URL, event_id));
    let response: ApiResponse<Page<SocialEventTransaction>> = self.http().get(&path, RequestOptions::new()).await?;
    check_page(&path, &response.data);
    Ok(response)
  }

  pub async fn mark_transaction_valid(
    &self,
    transaction_id: &str,
    is_valid: bool,
  ) -> Result<ApiResponse<Single<SocialEventTransaction>>, ApiError> {
    let path = format!("{}/transactions/{}/mark-as-valid", BASE_URL, transaction_id);
    self
      .http()
      .patch(&path, Body::Json(json!({ "isValid": is_valid })), RequestOptions::new())
      .await
  }
}
