//! Discussion Board
//!
//! A transient, in-memory board: posts with anonymous comment threads,
//! view counts and free-text search.
//!
//! - **types**: `Post`, `Comment`, `PostDraft`, `PostEdit`
//! - **store**: `Board`, the newest-first post list and its operations
//! - **error**: `BoardError`

pub mod error;
pub mod store;
pub mod types;

pub use error::{BoardError, BoardResult};
pub use store::Board;
pub use types::{Comment, CommentId, Post, PostDraft, PostEdit, PostId, ANONYMOUS_AUTHOR};
