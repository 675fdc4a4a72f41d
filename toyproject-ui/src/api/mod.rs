//! API Module
//!
//! Browser HTTP client for the auth and stats services.

mod client;

pub use client::*;
