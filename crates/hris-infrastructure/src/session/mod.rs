//! Session state and the 401 session guard.

mod guard;
mod store;

pub use guard::{RedirectTarget, SessionGuard, SIGN_IN_PATH};
pub use store::SessionStore;
