//! In-app notifications for the signed-in user.

use super::item_path;
use crate::api::{ApiClient, ApiError};
use hris_core::envelope::{unwrap_data, unwrap_list};
use serde_json::{json, Value};

const BASE: &str = "/api/notifications";

#[derive(Debug, Clone)]
pub struct NotificationService {
    client: ApiClient,
}

impl NotificationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Value>, ApiError> {
        let response = self.client.get(BASE).await?;
        Ok(unwrap_list(&response).to_vec())
    }

    /// Number of entries in `notifications` whose `read` flag is not `true`.
    pub fn unread_count(notifications: &[Value]) -> usize {
        notifications
            .iter()
            .filter(|n| !n.get("read").and_then(Value::as_bool).unwrap_or(false))
            .count()
    }

    pub async fn mark_read(&self, id: &str) -> Result<Value, ApiError> {
        let response = self
            .client
            .patch(&format!("{}/read", item_path(BASE, id)), json!({}))
            .await?;
        Ok(unwrap_data(&response).clone())
    }

    pub async fn mark_all_read(&self) -> Result<(), ApiError> {
        self.client
            .patch(&format!("{BASE}/read-all"), json!({}))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_transport::RecordingTransport;
    use crate::api::TokenStore;
    use crate::storage::MemorySlotStorage;
    use hris_core::events::UnauthorizedBus;
    use hris_core::http::Method;
    use std::sync::Arc;

    fn service() -> (NotificationService, RecordingTransport) {
        let transport = RecordingTransport::new();
        let tokens = TokenStore::new(Arc::new(MemorySlotStorage::new()));
        tokens.set_token("tok").unwrap();
        let client = ApiClient::new(
            "http://api.test",
            Arc::new(transport.clone()),
            tokens,
            UnauthorizedBus::new(),
        );
        (NotificationService::new(client), transport)
    }

    #[tokio::test]
    async fn test_list_and_unread_count() {
        let (service, transport) = service();
        transport.respond(
            200,
            r#"{ "data": [{ "id": 1, "read": true }, { "id": 2, "read": false }, { "id": 3 }] }"#,
        );

        let items = service.list().await.unwrap();

        assert_eq!(NotificationService::unread_count(&items), 2);
        assert_eq!(
            transport.last_request().header("authorization"),
            Some("Bearer tok")
        );
    }

    #[tokio::test]
    async fn test_mark_all_read_path() {
        let (service, transport) = service();

        service.mark_all_read().await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.url, "http://api.test/api/notifications/read-all");
    }
}
