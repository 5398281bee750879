//! Domain layer of the HRIS client.
//!
//! Nothing in this crate performs network or file I/O; the infrastructure
//! crate supplies the implementations behind [`http::HttpTransport`] and
//! [`storage::SlotStorage`].

pub mod config;
pub mod envelope;
pub mod error;
pub mod events;
pub mod http;
pub mod i18n;
pub mod storage;
pub mod user;

pub use error::{HrisError, Result};
