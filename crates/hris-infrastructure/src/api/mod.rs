//! HTTP access to the HRIS API.
//!
//! # Module Structure
//!
//! - `client`: [`ApiClient`], bearer injection, error normalization, 401 broadcast
//! - `token_store`: In-memory token mirrored into the `token` slot
//! - `reqwest_transport`: Production transport
//! - `error`: [`ApiError`]

mod client;
mod error;
mod reqwest_transport;
mod token_store;

#[cfg(any(test, feature = "test-util"))]
pub mod test_transport;

pub use client::{path_segment, ApiClient, RequestOptions};
pub use error::ApiError;
pub use reqwest_transport::ReqwestTransport;
pub use token_store::TokenStore;
