use serde_json::json;

use crate::api::types::{ApiResponse, KysDetails, KysFields, RejectionRequest, Single, VerificationStatus};
use crate::api::{Api, ApiError, Body, RequestOptions};

const BASE_URL: &str = "/api/kys/student";

type KysResponse = ApiResponse<Single<KysDetails>>;

fn student_path(student_id: &str, suffix: &str) -> String {
  format!("{}/{}{}", BASE_URL, student_id, suffix)
}

impl Api {
  pub async fn fetch_kys_details(&self, student_id: &str) -> Result<KysResponse, ApiError> {
    self
      .http()
      .get(&student_path(student_id, ""), RequestOptions::new())
      .await
  }

  pub async fn update_aadhaar(&self, student_id: &str, data: &KysFields) -> Result<KysResponse, ApiError> {
    self
      .http()
      .put(&student_path(student_id, "/aadhaar"), Body::json(data)?, RequestOptions::new())
      .await
  }

  pub async fn update_college_id(&self, student_id: &str, data: &KysFields) -> Result<KysResponse, ApiError> {
    self
      .http()
      .put(
        &student_path(student_id, "/college-id-card"),
        Body::json(data)?,
        RequestOptions::new(),
      )
      .await
  }

  pub async fn update_registration_certificate(
    &self,
    student_id: &str,
    data: &KysFields,
  ) -> Result<KysResponse, ApiError> {
    self
      .http()
      .put(
        &student_path(student_id, "/registration-certificate"),
        Body::json(data)?,
        RequestOptions::new(),
      )
      .await
  }

  pub async fn update_verification_status(
    &self,
    student_id: &str,
    status: &VerificationStatus,
  ) -> Result<KysResponse, ApiError> {
    self
      .http()
      .put(
        &student_path(student_id, "/verification-status"),
        Body::json(status)?,
        RequestOptions::new(),
      )
      .await
  }

  pub async fn create_rejection(&self, student_id: &str, data: &RejectionRequest) -> Result<KysResponse, ApiError> {
    self
      .http()
      .post(&student_path(student_id, "/reject"), Body::json(data)?, RequestOptions::new())
      .await
  }

  pub async fn resolve_rejection(
    &self,
    student_id: &str,
    log_id: &str,
    is_resolved: bool,
  ) -> Result<KysResponse, ApiError> {
    let path = student_path(student_id, &format!("/reject/{}/resolve", log_id));
    self
      .http()
      .patch(&path, Body::Json(json!({ "isResolved": is_resolved })), RequestOptions::new())
      .await
  }

  pub async fn verify_student(&self, student_id: &str) -> Result<KysResponse, ApiError> {
    self
      .http()
      .post(
        &student_path(student_id, "/mark-as-verified"),
        Body::Empty,
        RequestOptions::new(),
      )
      .await
  }
}
