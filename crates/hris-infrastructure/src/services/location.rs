//! Office locations (geofences) used for attendance.

use super::item_path;
use crate::api::{ApiClient, ApiError};
use hris_core::envelope::{unwrap_data, unwrap_list};
use hris_core::http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const BASE: &str = "/api/locations";

/// Payload for creating or updating a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInput {
    pub name: String,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Geofence radius in meters.
    pub radius: u32,
}

#[derive(Debug, Clone)]
pub struct LocationService {
    client: ApiClient,
}

impl LocationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Value>, ApiError> {
        let response = self.client.get(BASE).await?;
        Ok(unwrap_list(&response).to_vec())
    }

    pub async fn create(&self, input: &LocationInput) -> Result<Value, ApiError> {
        let response: Value = self.client.send_json(Method::Post, BASE, input).await?;
        Ok(unwrap_data(&response).clone())
    }

    pub async fn update(&self, id: &str, input: &LocationInput) -> Result<Value, ApiError> {
        let response: Value = self
            .client
            .send_json(Method::Put, &item_path(BASE, id), input)
            .await?;
        Ok(unwrap_data(&response).clone())
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&item_path(BASE, id)).await?;
        Ok(())
    }
}
