//! Service API
//!
//! Everything shared between the native client and the browser client:
//!
//! - **endpoints**: Paths of the auth, stats and board services
//! - **envelope**: The `{ success, message, data }` wrapper
//! - **error**: [`ApiError`] and the per-screen user-facing messages
//!
//! With the `native` feature, [`ApiClient`] performs the calls over
//! `reqwest`.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use toyproject::api::ApiClient;
//! use toyproject::config::Config;
//! use toyproject::storage::MemoryStorage;
//!
//! let config = Config::default();
//! let client = ApiClient::new(&config.api, Arc::new(MemoryStorage::new()))?;
//! let free = client.check_username("faker").await?;
//! ```

pub mod endpoints;
pub mod envelope;
pub mod error;

#[cfg(feature = "native")]
pub mod client;

pub use envelope::{error_message, parse_data, ApiResponse, Payload};
pub use error::{ApiError, ApiResult};

#[cfg(feature = "native")]
pub use client::ApiClient;
