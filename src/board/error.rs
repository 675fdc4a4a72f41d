//! Board error types

use thiserror::Error;

use super::types::PostId;

/// Errors surfaced by board operations
///
/// Each variant's message is shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Title, author or content left empty on the write form
    #[error("Please fill in every field ({})", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Comment text was blank
    #[error("Comment cannot be empty")]
    EmptyComment,

    /// No post with this id
    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    /// Edit/delete password did not match
    #[error("Password does not match")]
    PasswordMismatch,
}

/// Result type alias for board operations
pub type BoardResult<T> = Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BoardError::MissingFields(vec!["title", "content"]);
        assert_eq!(err.to_string(), "Please fill in every field (title, content)");

        let err = BoardError::PostNotFound(42);
        assert_eq!(err.to_string(), "Post not found: 42");
    }
}
