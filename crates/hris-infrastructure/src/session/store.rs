//! Session state: bearer token plus the signed-in user's profile.

use crate::api::TokenStore;
use hris_core::error::Result;
use hris_core::storage::{slots, SlotStorage};
use hris_core::user::UserProfile;
use std::sync::{Arc, PoisonError, RwLock};

/// Owns the user profile slot and shares the token with the API client.
///
/// The session counts as authenticated only when both a token and a
/// profile are present. Clones share state.
#[derive(Clone)]
pub struct SessionStore {
    tokens: TokenStore,
    storage: Arc<dyn SlotStorage>,
    /// `None` until the user slot has been read.
    user: Arc<RwLock<Option<Option<UserProfile>>>>,
}

impl SessionStore {
    pub fn new(tokens: TokenStore, storage: Arc<dyn SlotStorage>) -> Self {
        Self {
            tokens,
            storage,
            user: Arc::new(RwLock::new(None)),
        }
    }

    /// Records a successful sign-in. Replaces any previous profile.
    pub fn establish(&self, token: &str, profile: UserProfile) -> Result<()> {
        tracing::info!(role = profile.role().unwrap_or("unknown"), "Session established");
        self.tokens.set_token(token)?;
        self.set_user(profile)
    }

    /// Returns the profile, reading the user slot on first access.
    ///
    /// An unreadable or malformed slot is logged and treated as empty.
    pub fn user(&self) -> Option<UserProfile> {
        {
            let read_lock = self.user.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load_user();
        let mut write_lock = self.user.write().unwrap_or_else(PoisonError::into_inner);
        write_lock.get_or_insert(loaded).clone()
    }

    /// Replaces the profile.
    pub fn set_user(&self, profile: UserProfile) -> Result<()> {
        let json = serde_json::to_string(&profile)?;
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(Some(profile));
        self.storage.write(slots::USER, &json)
    }

    /// Merges `patch` into the current profile and persists the result.
    ///
    /// Known fields absent from `patch` are kept. The token is untouched.
    pub fn merge_user(&self, patch: &UserProfile) -> Result<UserProfile> {
        let mut merged = self.user().unwrap_or_default();
        merged.merge(patch);
        self.set_user(merged.clone())?;
        Ok(merged)
    }

    pub fn token(&self) -> Option<String> {
        self.tokens.get_token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.has_token() && self.user().is_some()
    }

    /// Clears both the token and the profile.
    ///
    /// Both slots are cleared even if the first removal fails; the first
    /// error is returned.
    pub fn logout(&self) -> Result<()> {
        let token_result = self.tokens.clear_token();
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(None);
        let user_result = self.storage.remove(slots::USER);
        tracing::info!("Session cleared");
        token_result.and(user_result)
    }

    fn load_user(&self) -> Option<UserProfile> {
        let raw = match self.storage.read(slots::USER) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Failed to read user slot: {}", e);
                return None;
            }
        };
        match serde_json::from_str::<UserProfile>(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!("Discarding malformed user slot: {}", e);
                None
            }
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("tokens", &self.tokens)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
