//! # ToyProject
//!
//! A discussion board and a League of Legends match-history lookup, with
//! username/password auth screens, over external REST services.
//!
//! ## Modules
//!
//! - [`board`]: In-memory discussion board (posts, comments, search)
//! - [`auth`]: Signup/login validation and the persisted session
//! - [`riot`]: Match-history models, derived stats and view state
//! - [`api`]: Response envelope, endpoint routes and the error taxonomy
//! - [`format`]: Display formatting shared by every front end
//! - [`storage`]: Key-value storage backing the session
//!
//! With the default `native` feature the crate also provides the `reqwest`
//! client ([`api::ApiClient`]), TOML [`config`] and the explicit
//! [`context::AppContext`] used by the `toyproject` binary. The Leptos
//! frontend depends on this crate with `default-features = false`.
//!
//! ## Quick Start
//!
//! ```rust
//! use toyproject::board::{Board, PostDraft};
//!
//! let now = chrono::Utc::now();
//! let mut board = Board::seeded(now);
//!
//! let id = board
//!     .submit(PostDraft::new("Hello", "me", "First post!"), now)
//!     .expect("all fields filled in");
//!
//! assert_eq!(board.posts()[0].id, id);
//! assert_eq!(board.open(id).unwrap().views, 1);
//! ```

pub mod api;
pub mod auth;
pub mod board;
pub mod format;
pub mod riot;
pub mod storage;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod context;

pub use api::{ApiError, ApiResponse, ApiResult};
pub use auth::{AuthenticatedUser, Session};
pub use board::{Board, BoardError, Comment, Post, PostDraft, PostId};
pub use riot::{ExpandedMatches, MatchDetail, MatchSearch, MatchSummary, PlayerMatches};
pub use storage::{KeyValueStorage, MemoryStorage, StorageError};

#[cfg(feature = "native")]
pub use api::ApiClient;
#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
#[cfg(feature = "native")]
pub use context::AppContext;
#[cfg(feature = "native")]
pub use storage::FileStorage;
