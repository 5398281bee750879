//! User domain module.
//!
//! # Usage
//!
//! ```
//! use hris_core::user::UserProfile;
//!
//! let profile = UserProfile::new().with("role", "admin");
//! assert!(profile.is_admin());
//! ```

mod model;

pub use model::UserProfile;
