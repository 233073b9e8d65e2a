use reqwest::multipart::{Form, Part};
use std::path::Path;

use crate::api::types::{ApiResponse, Single, Upload};
use crate::api::{Api, ApiError, Body, RequestOptions};

/// A file ready to be sent as the `file` field of a multipart upload.
#[derive(Debug, Clone)]
pub struct FileUpload {
  pub file_name: String,
  pub bytes: Vec<u8>,
}

impl FileUpload {
  pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
    Self {
      file_name: file_name.into(),
      bytes,
    }
  }

  /// Read a file from disk, named after its last path component.
  pub async fn from_path(path: &Path) -> std::io::Result<Self> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| "upload".to_string());
    Ok(Self::new(file_name, bytes))
  }

  fn into_form(self) -> Form {
    Form::new().part("file", Part::bytes(self.bytes).file_name(self.file_name))
  }
}

impl Api {
  pub async fn upload_file(&self, file: FileUpload) -> Result<ApiResponse<Single<Upload>>, ApiError> {
    self
      .http()
      .post(
        "/api/upload",
        Body::Multipart(file.into_form()),
        RequestOptions::new().with_files(),
      )
      .await
  }
}
