//! Durable storage slots.
//!
//! A slot is a named string value that survives process restarts. Each slot
//! has one owning module; see [`slots`] for the names in use.

use crate::error::Result;

/// Names of the durable slots.
pub mod slots {
    /// Bearer token, owned by the token store.
    pub const TOKEN: &str = "token";
    /// JSON-serialized user profile, owned by the session store.
    pub const USER: &str = "user";
    pub const THEME: &str = "theme";
    pub const LANGUAGE: &str = "language";
    /// Email remembered on the sign-in form.
    pub const REMEMBER_EMAIL: &str = "remember_email";
    /// `"true"` when the user ticked "remember me".
    pub const REMEMBER_ME: &str = "remember_me";
}

/// Key-value storage for slots.
///
/// Reads are lazy (callers read on first access) and writes are eager; there
/// is no transactional guarantee across slots. Last write wins.
pub trait SlotStorage: Send + Sync {
    /// Reads a slot. `Ok(None)` when the slot has never been written or was removed.
    fn read(&self, slot: &str) -> Result<Option<String>>;

    fn write(&self, slot: &str, value: &str) -> Result<()>;

    /// Removes a slot. Removing an absent slot is not an error.
    fn remove(&self, slot: &str) -> Result<()>;
}
