//! State Management
//!
//! Global application state and the `localStorage` adapter.

pub mod global;
pub mod storage;

pub use global::{provide_global_state, GlobalState, Notice, NoticeKind};
pub use storage::WebStorage;
