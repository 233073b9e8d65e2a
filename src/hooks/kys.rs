use super::{keys, Hooks};
use crate::api::types::{ApiResponse, KysDetails, KysFields, RejectionRequest, Single, VerificationStatus};
use crate::api::ApiError;
use crate::notify::Notification;
use crate::query::{MutationSpec, QueryDef};

type KysResponse = ApiResponse<Single<KysDetails>>;

/// Every KYS edit makes that student's details stale.
fn kys_edit(name: &'static str, done: &'static str, student_id: &str) -> MutationSpec<KysResponse> {
  MutationSpec::new(name)
    .invalidates(keys::kys(student_id))
    .notify_success(move |_| Notification::success("Success", done))
}

impl Hooks {
  /// KYS details for one student. Load failures are surfaced to the user.
  pub fn kys_details(&self, student_id: &str) -> QueryDef<KysResponse> {
    let id = student_id.to_string();
    let options = self
      .notifying_options("Failed to load KYS details")
      .enabled(!student_id.is_empty());
    self.query(keys::kys(student_id), options, move |api| {
      let id = id.clone();
      async move { api.fetch_kys_details(&id).await }
    })
  }

  pub async fn update_aadhaar(&self, student_id: &str, data: &KysFields) -> Result<KysResponse, ApiError> {
    let spec = kys_edit("Update Aadhaar", "Updated Aadhaar details", student_id);
    self.mutate(spec, self.api.update_aadhaar(student_id, data)).await
  }

  pub async fn update_college_id(&self, student_id: &str, data: &KysFields) -> Result<KysResponse, ApiError> {
    let spec = kys_edit("Update college ID", "Updated College ID details", student_id);
    self.mutate(spec, self.api.update_college_id(student_id, data)).await
  }

  pub async fn update_registration_certificate(
    &self,
    student_id: &str,
    data: &KysFields,
  ) -> Result<KysResponse, ApiError> {
    let spec = kys_edit(
      "Update registration certificate",
      "Updated Registration Certificate details",
      student_id,
    );
    self
      .mutate(spec, self.api.update_registration_certificate(student_id, data))
      .await
  }

  pub async fn update_verification_status(
    &self,
    student_id: &str,
    status: &VerificationStatus,
  ) -> Result<KysResponse, ApiError> {
    let spec = kys_edit("Update verification status", "Updated Verification Status", student_id);
    self
      .mutate(spec, self.api.update_verification_status(student_id, status))
      .await
  }

  pub async fn create_rejection(&self, student_id: &str, data: &RejectionRequest) -> Result<KysResponse, ApiError> {
    let spec = kys_edit("Create rejection", "Rejection created", student_id);
    self.mutate(spec, self.api.create_rejection(student_id, data)).await
  }

  pub async fn resolve_rejection(
    &self,
    student_id: &str,
    log_id: &str,
    is_resolved: bool,
  ) -> Result<KysResponse, ApiError> {
    let spec = kys_edit("Resolve rejection", "Rejection updated", student_id);
    self
      .mutate(spec, self.api.resolve_rejection(student_id, log_id, is_resolved))
      .await
  }

  /// Marks the student verified, so the student lists change too.
  pub async fn verify_student(&self, student_id: &str) -> Result<KysResponse, ApiError> {
    let spec = kys_edit("Verify student", "Student Verified", student_id)
      .invalidates(keys::all(keys::STUDENTS))
      .invalidates(keys::student(student_id));
    self.mutate(spec, self.api.verify_student(student_id)).await
  }
}
