use super::Hooks;
use crate::api::requests::FileUpload;
use crate::api::types::{ApiResponse, Single, Upload};
use crate::api::ApiError;
use crate::query::MutationSpec;

impl Hooks {
  /// Upload a file. Nothing cached depends on it, so nothing is invalidated.
  pub async fn upload_file(&self, file: FileUpload) -> Result<ApiResponse<Single<Upload>>, ApiError> {
    self.mutate(MutationSpec::new("Upload"), self.api.upload_file(file)).await
  }
}
