//! Typed publish/subscribe for process-wide notifications.
//!
//! The HTTP client publishes an [`UnauthorizedEvent`] whenever the server
//! answers 401; a session guard subscribes to it and tears the session down.
//! Neither side knows about the other.

use crate::http::Method;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

/// Published when the server rejects a request with 401.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnauthorizedEvent {
    pub method: Method,
    /// Request path as passed to the client, without the base URL.
    pub path: String,
    /// Message extracted from the server response.
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

impl UnauthorizedEvent {
    pub fn new(method: Method, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            message: message.into(),
            occurred_at: Utc::now(),
        }
    }
}

/// Bus carrying [`UnauthorizedEvent`]s.
pub type UnauthorizedBus = EventBus<UnauthorizedEvent>;

type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct Subscribers<E> {
    next_id: AtomicU64,
    callbacks: RwLock<BTreeMap<u64, Callback<E>>>,
}

/// Fan-out event bus.
///
/// Cloning the bus yields another handle to the same subscriber list.
pub struct EventBus<E> {
    inner: Arc<Subscribers<E>>,
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Subscribers {
                next_id: AtomicU64::new(0),
                callbacks: RwLock::new(BTreeMap::new()),
            }),
        }
    }
}

impl<E: 'static> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<E: 'static> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for every future event.
    ///
    /// The returned [`Subscription`] does not unsubscribe on drop; call
    /// [`Subscription::unsubscribe`] explicitly.
    pub fn subscribe<F>(&self, callback: F) -> Subscription<E>
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .callbacks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(callback));
        Subscription {
            id,
            subscribers: Arc::downgrade(&self.inner),
        }
    }

    /// Delivers `event` to every current subscriber.
    ///
    /// A subscriber that panics is logged and skipped; the remaining
    /// subscribers still run. Returns the number of subscribers that
    /// completed normally.
    pub fn publish(&self, event: &E) -> usize {
        // Snapshot so callbacks may subscribe/unsubscribe without deadlocking.
        let callbacks: Vec<(u64, Callback<E>)> = self
            .inner
            .callbacks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(id, cb)| (*id, Arc::clone(cb)))
            .collect();

        let mut delivered = 0;
        for (id, callback) in callbacks {
            match panic::catch_unwind(AssertUnwindSafe(|| callback(event))) {
                Ok(()) => delivered += 1,
                Err(_) => tracing::warn!(subscriber = id, "Event subscriber panicked"),
            }
        }
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .callbacks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Handle returned by [`EventBus::subscribe`].
pub struct Subscription<E> {
    id: u64,
    subscribers: Weak<Subscribers<E>>,
}

impl<E> Subscription<E> {
    /// Removes the callback. No-op if the bus is gone.
    pub fn unsubscribe(self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers
                .callbacks
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&self.id);
        }
    }
}

impl<E> std::fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
