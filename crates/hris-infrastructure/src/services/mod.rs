//! Typed wrappers over the remote REST endpoints.
//!
//! Services never swallow [`ApiError`](crate::api::ApiError)s; callers decide
//! how to surface them. A 401 has already been broadcast by the time a
//! service returns it.

pub mod auth;
pub mod checkclock;
pub mod employee;
pub mod location;
pub mod notification;

pub use auth::AuthService;
pub use checkclock::CheckclockService;
pub use employee::{AvatarUpload, EmployeeService};
pub use location::{LocationInput, LocationService};
pub use notification::NotificationService;

use crate::api::path_segment;

/// `{base}/{id}` with `id` encoded as a single path segment.
fn item_path(base: &str, id: &str) -> String {
    format!("{}/{}", base, path_segment(id))
}
