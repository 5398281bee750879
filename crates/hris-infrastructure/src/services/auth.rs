//! Sign-in flows and the current-user endpoint.

use crate::api::{ApiClient, ApiError};
use crate::session::SessionStore;
use hris_core::envelope::{extract_token, unwrap_user};
use hris_core::user::UserProfile;
use serde_json::{json, Value};

/// Authentication endpoints under `/auth`.
///
/// Every sign-in flow ends the same way: the token and user are pulled out of
/// the response envelope and handed to [`SessionStore::establish`].
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
    session: SessionStore,
}

impl AuthService {
    pub fn new(client: ApiClient, session: SessionStore) -> Self {
        Self { client, session }
    }

    /// Email + password sign-in.
    pub async fn sign_in_password(&self, email: &str, password: &str) -> Result<UserProfile, ApiError> {
        let response = self
            .client
            .post("/auth/login", json!({ "email": email, "password": password }))
            .await?;
        self.complete_sign_in(&response)
    }

    /// Federated sign-in with a Google ID token.
    pub async fn sign_in_google(&self, id_token: &str) -> Result<UserProfile, ApiError> {
        let response = self
            .client
            .post("/auth/google", json!({ "credential": id_token }))
            .await?;
        self.complete_sign_in(&response)
    }

    /// Sign-in with company code, employee ID and password.
    pub async fn sign_in_employee(
        &self,
        company_code: &str,
        employee_id: &str,
        password: &str,
    ) -> Result<UserProfile, ApiError> {
        let response = self
            .client
            .post(
                "/auth/login/employee",
                json!({
                    "company_code": company_code,
                    "employee_id": employee_id,
                    "password": password,
                }),
            )
            .await?;
        self.complete_sign_in(&response)
    }

    /// Fetches the current user and merges it into the stored profile.
    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        let response = self.client.get("/auth/me").await?;
        let patch = profile_from(&response);
        Ok(self.session.merge_user(&patch)?)
    }

    /// Tells the server the session ended, then clears it locally.
    ///
    /// The local session is cleared even when the server call fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        if self.session.token().is_some() {
            if let Err(e) = self.client.post("/auth/logout", json!({})).await {
                tracing::debug!("Server-side logout failed: {}", e);
            }
        }
        Ok(self.session.logout()?)
    }

    fn complete_sign_in(&self, response: &Value) -> Result<UserProfile, ApiError> {
        let token = extract_token(response).ok_or_else(|| ApiError::Serialization {
            message: "Sign-in response did not include a token".to_string(),
        })?;
        let profile = profile_from(response);
        self.session.establish(token, profile.clone())?;
        Ok(profile)
    }
}

/// Builds a profile from a response, dropping credential fields.
fn profile_from(response: &Value) -> UserProfile {
    let mut profile = UserProfile::from_value(unwrap_user(response)).unwrap_or_default();
    for field in ["token", "access_token", "data"] {
        profile.remove(field);
    }
    profile
}
