//! I/O layer of the HRIS client: storage, configuration, the authenticated
//! API client and everything built on it.

pub mod api;
pub mod config_service;
pub mod paths;
pub mod preferences;
pub mod services;
pub mod session;
pub mod storage;

pub use api::{ApiClient, ApiError, RequestOptions, ReqwestTransport, TokenStore};
pub use config_service::ConfigService;
pub use paths::HrisPaths;
pub use preferences::{Preferences, Theme};
pub use session::{RedirectTarget, SessionGuard, SessionStore};
pub use storage::{JsonSlotStorage, MemorySlotStorage};
