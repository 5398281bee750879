//! Bearer token holder mirrored into the `token` slot.

use hris_core::error::Result;
use hris_core::storage::{slots, SlotStorage};
use std::sync::{Arc, PoisonError, RwLock};

/// Holds the bearer token in memory and in durable storage.
///
/// The slot is read on first access only; every mutation writes through.
/// Clones share the same token.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn SlotStorage>,
    /// `None` until the slot has been read; then the current token.
    cached: Arc<RwLock<Option<Option<String>>>>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn SlotStorage>) -> Self {
        Self {
            storage,
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Stores `token` in memory and in the token slot.
    ///
    /// The in-memory token is updated even if persisting fails.
    pub fn set_token(&self, token: &str) -> Result<()> {
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) =
            Some(Some(token.to_string()));
        self.storage.write(slots::TOKEN, token)
    }

    /// Returns the current token, reading the slot on first access.
    ///
    /// An empty token counts as absent. A slot that cannot be read is logged
    /// and treated as empty.
    pub fn get_token(&self) -> Option<String> {
        {
            let read_lock = self.cached.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return cached.clone().filter(|t| !t.is_empty());
            }
        }

        let loaded = match self.storage.read(slots::TOKEN) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Failed to read token slot: {}", e);
                None
            }
        };

        let mut write_lock = self.cached.write().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have set a token while we were reading.
        write_lock
            .get_or_insert(loaded)
            .clone()
            .filter(|t| !t.is_empty())
    }

    /// Removes the token from memory and from the token slot.
    pub fn clear_token(&self) -> Result<()> {
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = Some(None);
        self.storage.remove(slots::TOKEN)
    }

    pub fn has_token(&self) -> bool {
        self.get_token().is_some()
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the token itself.
        f.debug_struct("TokenStore")
            .field("has_token", &self.has_token())
            .finish()
    }
}
