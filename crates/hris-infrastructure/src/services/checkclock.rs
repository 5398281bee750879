//! Admin review of attendance (check-in / check-out) submissions.

use super::item_path;
use crate::api::{ApiClient, ApiError, RequestOptions};
use hris_core::envelope::{unwrap_data, unwrap_list};
use hris_core::http::Method;
use serde_json::{json, Value};

const BASE: &str = "/api/admin/checkclock";

#[derive(Debug, Clone)]
pub struct CheckclockService {
    client: ApiClient,
}

impl CheckclockService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Lists submissions, optionally filtered by status (`pending`, `approved`, `rejected`).
    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Value>, ApiError> {
        let mut options = RequestOptions::new(Method::Get);
        if let Some(status) = status {
            options = options.query("status", status);
        }
        let response = self.client.request(BASE, options).await?;
        Ok(unwrap_list(&response).to_vec())
    }

    pub async fn get(&self, id: &str) -> Result<Value, ApiError> {
        let response = self.client.get(&item_path(BASE, id)).await?;
        Ok(unwrap_data(&response).clone())
    }

    pub async fn approve(&self, id: &str) -> Result<Value, ApiError> {
        let response = self
            .client
            .patch(&format!("{}/approve", item_path(BASE, id)), json!({}))
            .await?;
        Ok(unwrap_data(&response).clone())
    }

    pub async fn reject(&self, id: &str, reason: Option<&str>) -> Result<Value, ApiError> {
        let response = self
            .client
            .patch(&format!("{}/reject", item_path(BASE, id)), json!({ "reason": reason }))
            .await?;
        Ok(unwrap_data(&response).clone())
    }
}
