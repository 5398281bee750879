//! Employee records under `/api/employees`.

use super::item_path;
use crate::api::{ApiClient, ApiError};
use hris_core::envelope::{unwrap_data, unwrap_list};
use hris_core::http::MultipartForm;
use serde_json::Value;

const BASE: &str = "/api/employees";

/// An avatar image ready for upload.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct EmployeeService {
    client: ApiClient,
}

impl EmployeeService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<Vec<Value>, ApiError> {
        let response = self.client.get(BASE).await?;
        Ok(unwrap_list(&response).to_vec())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Value, ApiError> {
        let response = self.client.get(&item_path(BASE, id)).await?;
        Ok(unwrap_data(&response).clone())
    }

    pub async fn create(&self, employee: Value) -> Result<Value, ApiError> {
        let response = self.client.post(BASE, employee).await?;
        Ok(unwrap_data(&response).clone())
    }

    pub async fn update(&self, id: &str, employee: Value) -> Result<Value, ApiError> {
        let response = self.client.put(&item_path(BASE, id), employee).await?;
        Ok(unwrap_data(&response).clone())
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&item_path(BASE, id)).await?;
        Ok(())
    }

    /// Uploads a profile picture as the `avatar` form field.
    pub async fn upload_avatar(&self, id: &str, avatar: AvatarUpload) -> Result<Value, ApiError> {
        let form = MultipartForm::new().file(
            "avatar",
            avatar.file_name,
            avatar.mime_type,
            avatar.bytes,
        );
        let response = self
            .client
            .upload(&format!("{}/avatar", item_path(BASE, id)), form)
            .await?;
        Ok(unwrap_data(&response).clone())
    }
}
