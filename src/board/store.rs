//! In-memory board store
//!
//! Holds posts newest-first. Nothing here outlives the process (or the page):
//! a fresh board is seeded from a fixed welcome list.

use chrono::{DateTime, Duration, TimeZone, Utc};

use super::error::{BoardError, BoardResult};
use super::types::{Comment, CommentId, Post, PostDraft, PostEdit, PostId, ANONYMOUS_AUTHOR};

/// The discussion board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Newest first
    posts: Vec<Post>,
    next_post_id: PostId,
    next_comment_id: CommentId,
}

impl Board {
    /// Empty board
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            next_post_id: 1,
            next_comment_id: 1,
        }
    }

    /// Board with the two welcome posts shown on first visit
    ///
    /// `now` stamps the sample comment.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let opened = Utc
            .with_ymd_and_hms(2025, 8, 9, 10, 0, 0)
            .single()
            .unwrap_or(now);

        let welcome = Post {
            id: 1,
            title: "The board is open!".to_string(),
            author: "Admin".to_string(),
            content: "A simple board service is now open. Feel free to write anything!"
                .to_string(),
            created_at: opened,
            views: 15,
            comments: Vec::new(),
            password: None,
        };

        let built_with = Post {
            id: 2,
            title: "A board built with Rust".to_string(),
            author: "Developer".to_string(),
            content: "This board runs entirely in the browser. It is responsive, so it \
                      works well on mobile too."
                .to_string(),
            created_at: opened + Duration::minutes(90),
            views: 8,
            comments: vec![Comment {
                id: 1,
                author: "User1".to_string(),
                content: "Looks clean, nicely done!".to_string(),
                created_at: now,
            }],
            password: None,
        };

        Self {
            posts: vec![welcome, built_with],
            next_post_id: 3,
            next_comment_id: 2,
        }
    }

    /// All posts, newest first
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Publish a post from the write form
    ///
    /// Title, author and content are required. The post goes to the top of
    /// the list with no views and no comments.
    pub fn submit(&mut self, draft: PostDraft, now: DateTime<Utc>) -> BoardResult<PostId> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            tracing::debug!(?missing, "Rejected post with blank fields");
            return Err(BoardError::MissingFields(missing));
        }

        let id = self.allocate_post_id();
        let password = (!draft.password.is_empty()).then_some(draft.password);

        self.posts.insert(
            0,
            Post {
                id,
                title: draft.title,
                author: draft.author,
                content: draft.content,
                created_at: now,
                views: 0,
                comments: Vec::new(),
                password,
            },
        );

        tracing::debug!(post_id = id, "Post created");
        Ok(id)
    }

    /// Open a post for reading; each call counts one view
    pub fn open(&mut self, id: PostId) -> BoardResult<&Post> {
        let post = self.get_mut(id)?;
        post.views = post.views.saturating_add(1);
        Ok(&*post)
    }

    /// Append an anonymous comment
    pub fn add_comment(
        &mut self,
        id: PostId,
        content: &str,
        now: DateTime<Utc>,
    ) -> BoardResult<CommentId> {
        if content.trim().is_empty() {
            return Err(BoardError::EmptyComment);
        }

        let comment_id = self.next_comment_id;
        let post = self.get_mut(id)?;
        post.comments.push(Comment {
            id: comment_id,
            author: ANONYMOUS_AUTHOR.to_string(),
            content: content.to_string(),
            created_at: now,
        });
        self.next_comment_id += 1;

        Ok(comment_id)
    }

    /// Posts whose title, author or content contain `term`, ignoring case
    ///
    /// The term is matched as typed, spaces included; an empty term matches
    /// everything. List order is preserved.
    pub fn search(&self, term: &str) -> Vec<&Post> {
        let needle = term.to_lowercase();
        if needle.is_empty() {
            return self.posts.iter().collect();
        }

        self.posts
            .iter()
            .filter(|p| p.matches_lowercase(&needle))
            .collect()
    }

    /// Change a post's title and/or content
    ///
    /// `password` must equal the one given at creation (empty when none was).
    pub fn update(&mut self, id: PostId, password: &str, edit: PostEdit) -> BoardResult<&Post> {
        let post = self.get_mut(id)?;
        check_password(post, password)?;

        if let Some(title) = edit.title.filter(|t| !t.trim().is_empty()) {
            post.title = title;
        }
        if let Some(content) = edit.content.filter(|c| !c.trim().is_empty()) {
            post.content = content;
        }

        Ok(&*post)
    }

    /// Remove a post and its comments
    pub fn delete(&mut self, id: PostId, password: &str) -> BoardResult<Post> {
        let index = self
            .posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(BoardError::PostNotFound(id))?;
        check_password(&self.posts[index], password)?;

        tracing::debug!(post_id = id, "Post deleted");
        Ok(self.posts.remove(index))
    }

    fn get_mut(&mut self, id: PostId) -> BoardResult<&mut Post> {
        self.posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(BoardError::PostNotFound(id))
    }

    fn allocate_post_id(&mut self) -> PostId {
        // Posts loaded from elsewhere may already use higher ids
        let floor = self.posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let id = self.next_post_id.max(floor);
        self.next_post_id = id + 1;
        id
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Post>> for Board {
    /// Board over posts fetched from the board service, kept in given order
    fn from(posts: Vec<Post>) -> Self {
        let next_post_id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let next_comment_id = posts
            .iter()
            .flat_map(|p| p.comments.iter().map(|c| c.id))
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            posts,
            next_post_id,
            next_comment_id,
        }
    }
}

fn check_password(post: &Post, supplied: &str) -> BoardResult<()> {
    if post.password.as_deref().unwrap_or("") == supplied {
        Ok(())
    } else {
        Err(BoardError::PasswordMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_seeded_board() {
        let board = Board::seeded(now());
        assert_eq!(board.len(), 2);
        assert_eq!(board.posts()[0].views, 15);
        assert_eq!(board.posts()[1].comment_count(), 1);
        assert_eq!(board.posts()[1].comments[0].created_at, now());
    }

    #[test]
    fn test_submit_with_blank_field_adds_nothing() {
        let mut board = Board::seeded(now());

        for draft in [
            PostDraft::new("", "me", "body"),
            PostDraft::new("title", "", "body"),
            PostDraft::new("title", "me", ""),
        ] {
            let err = board.submit(draft, now()).unwrap_err();
            assert!(matches!(err, BoardError::MissingFields(_)));
        }

        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_new_post_goes_first_with_no_views() {
        let mut board = Board::seeded(now());
        let id = board
            .submit(PostDraft::new("Hello", "me", "First!"), now())
            .unwrap();

        let first = &board.posts()[0];
        assert_eq!(first.id, id);
        assert_eq!(first.views, 0);
        assert!(first.comments.is_empty());
        assert_eq!(first.created_at, now());

        // Ids stay unique
        let second = board
            .submit(PostDraft::new("Again", "me", "Second"), now())
            .unwrap();
        assert_ne!(id, second);
        assert_eq!(board.posts()[0].id, second);
    }

    #[test]
    fn test_open_counts_one_view_per_call() {
        let mut board = Board::new();
        let id = board
            .submit(PostDraft::new("Hello", "me", "First!"), now())
            .unwrap();

        assert_eq!(board.open(id).unwrap().views, 1);
        assert_eq!(board.open(id).unwrap().views, 2);
        assert_eq!(board.open(id).unwrap().views, 3);

        assert_eq!(board.open(999), Err(BoardError::PostNotFound(999)));
    }

    #[test]
    fn test_add_comment() {
        let mut board = Board::seeded(now());

        assert_eq!(
            board.add_comment(1, "   ", now()),
            Err(BoardError::EmptyComment)
        );

        let first = board.add_comment(1, "Nice", now()).unwrap();
        let second = board.add_comment(1, "Agreed", now()).unwrap();
        assert_ne!(first, second);

        let post = board.get(1).unwrap();
        let texts: Vec<&str> = post.comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(texts, vec!["Nice", "Agreed"]);
        assert!(post.comments.iter().all(|c| c.author == ANONYMOUS_AUTHOR));

        // The seeded comment already uses id 1
        assert!(board.get(2).unwrap().comments.iter().all(|c| c.id != first));
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let mut board = Board::new();
        board
            .submit(PostDraft::new("Patch notes", "Riot", "Balance changes"), now())
            .unwrap();
        board
            .submit(PostDraft::new("Lunch", "sam", "Anyone for RAMEN?"), now())
            .unwrap();
        board
            .submit(PostDraft::new("Hello", "Faker", "first post"), now())
            .unwrap();

        let titles = |term: &str| -> Vec<String> {
            board.search(term).into_iter().map(|p| p.title.clone()).collect()
        };

        assert_eq!(titles("PATCH"), vec!["Patch notes"]);
        assert_eq!(titles("faker"), vec!["Hello"]);
        assert_eq!(titles("ramen"), vec!["Lunch"]);
        assert_eq!(titles("o"), vec!["Hello", "Lunch", "Patch notes"]);
        assert!(titles("zzz").is_empty());
        assert_eq!(titles("").len(), 3);
    }

    #[test]
    fn test_search_keeps_surrounding_spaces() {
        let mut board = Board::new();
        board
            .submit(PostDraft::new("Hello", "me", "short"), now())
            .unwrap();
        board
            .submit(PostDraft::new("Say hello world", "you", "longer"), now())
            .unwrap();

        let titles = |term: &str| -> Vec<String> {
            board.search(term).into_iter().map(|p| p.title.clone()).collect()
        };

        assert_eq!(titles("hello "), vec!["Say hello world"]);
        assert_eq!(titles(" HELLO"), vec!["Say hello world"]);
        assert_eq!(titles("  "), Vec::<String>::new());
        assert_eq!(titles(" "), vec!["Say hello world"]);
    }

    #[test]
    fn test_update_and_delete_require_password() {
        let mut board = Board::new();
        let id = board
            .submit(PostDraft::new("Draft", "me", "v1").password("pw"), now())
            .unwrap();

        let edit = PostEdit {
            title: Some("Final".to_string()),
            content: None,
        };
        assert_eq!(
            board.update(id, "wrong", edit.clone()),
            Err(BoardError::PasswordMismatch)
        );

        let post = board.update(id, "pw", edit).unwrap();
        assert_eq!(post.title, "Final");
        assert_eq!(post.content, "v1");

        assert_eq!(board.delete(id, ""), Err(BoardError::PasswordMismatch));
        assert_eq!(board.delete(id, "pw").unwrap().title, "Final");
        assert!(board.is_empty());
    }

    #[test]
    fn test_from_fetched_posts_continues_ids() {
        let mut board = Board::from(Board::seeded(now()).posts().to_vec());
        let id = board
            .submit(PostDraft::new("t", "a", "c"), now())
            .unwrap();
        assert_eq!(id, 3);

        let comment = board.add_comment(2, "hi", now()).unwrap();
        assert_eq!(comment, 2);
    }
}
