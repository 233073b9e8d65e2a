use super::{keys, Hooks};
use crate::api::types::{ApiResponse, Institution, InstitutionRequest, Page, Single};
use crate::api::ApiError;
use crate::notify::Notification;
use crate::query::{MutationSpec, QueryDef};

type InstitutionResponse = ApiResponse<Single<Institution>>;

impl Hooks {
  pub fn institutions(&self, page: u32, limit: u32) -> QueryDef<ApiResponse<Page<Institution>>> {
    self.query(
      keys::institutions(page, limit),
      self.options().keep_previous_data(),
      move |api| async move { api.fetch_institutions(page, limit).await },
    )
  }

  pub async fn create_institution(&self, data: &InstitutionRequest) -> Result<InstitutionResponse, ApiError> {
    let spec = MutationSpec::new("Create institution")
      .invalidates(keys::all(keys::INSTITUTIONS))
      .notify_success(|_| Notification::success("Success", "Institution created successfully"));
    self.mutate(spec, self.api.create_institution(data)).await
  }

  pub async fn delete_institution(&self, institution_id: &str) -> Result<InstitutionResponse, ApiError> {
    let spec = MutationSpec::new("Delete institution")
      .invalidates(keys::all(keys::INSTITUTIONS))
      .notify_success(|_| Notification::success("Success", "Institution removed successfully"));
    self.mutate(spec, self.api.delete_institution(institution_id)).await
  }
}
