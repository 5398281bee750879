//! Central reaction to 401 responses.

use super::SessionStore;
use hris_core::events::{Subscription, UnauthorizedBus, UnauthorizedEvent};
use std::sync::{Arc, Mutex, PoisonError};

/// Route the user is sent to after a forced sign-out.
pub const SIGN_IN_PATH: &str = "/sign-in";

/// Where to send the user after the session was torn down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    /// Always [`SIGN_IN_PATH`].
    pub to: String,
    /// Location the user was on, for an optional post-login redirect.
    pub from: Option<String>,
}

#[derive(Default)]
struct GuardState {
    location: Option<String>,
    pending: Option<RedirectTarget>,
}

/// Subscribes to the unauthorized bus and logs the session out on every event.
///
/// The guard does not navigate anywhere itself; the UI layer polls
/// [`SessionGuard::take_redirect`].
pub struct SessionGuard {
    state: Arc<Mutex<GuardState>>,
    subscription: Subscription<UnauthorizedEvent>,
}

impl SessionGuard {
    pub fn install(bus: &UnauthorizedBus, session: SessionStore) -> Self {
        let state = Arc::new(Mutex::new(GuardState::default()));
        let handler_state = Arc::clone(&state);

        let subscription = bus.subscribe(move |event: &UnauthorizedEvent| {
            tracing::warn!(path = %event.path, "Session rejected by server; signing out");
            if let Err(e) = session.logout() {
                tracing::warn!("Failed to clear session: {}", e);
            }
            let mut state = handler_state.lock().unwrap_or_else(PoisonError::into_inner);
            let from = state.location.clone();
            state.pending = Some(RedirectTarget {
                to: SIGN_IN_PATH.to_string(),
                from,
            });
        });

        Self {
            state,
            subscription,
        }
    }

    /// Records the location the user is currently on.
    pub fn set_location(&self, location: impl Into<String>) {
        self.lock().location = Some(location.into());
    }

    /// Returns and clears the pending redirect, if any.
    pub fn take_redirect(&self) -> Option<RedirectTarget> {
        self.lock().pending.take()
    }

    /// Stops reacting to unauthorized events.
    pub fn uninstall(self) {
        self.subscription.unsubscribe();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GuardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
