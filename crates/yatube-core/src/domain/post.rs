use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a short text published by an author, optionally in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub group_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// The editable part of a post, produced by a cleaned form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub text: String,
    pub group_id: Option<Uuid>,
}

impl Post {
    /// Create a new post authored by `author_id`.
    pub fn new(author_id: Uuid, draft: PostDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            text: draft.text,
            group_id: draft.group_id,
            created_at: Utc::now(),
        }
    }

    /// Replace text and group. Author, id and creation time never change.
    pub fn revise(&mut self, draft: PostDraft) {
        self.text = draft.text;
        self.group_id = draft.group_id;
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }
}

/// Which posts a feed is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    All,
    Group(Uuid),
    Author(Uuid),
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            PostFilter::All => true,
            PostFilter::Group(id) => post.group_id == Some(*id),
            PostFilter::Author(id) => post.author_id == *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(text: &str, group_id: Option<Uuid>) -> PostDraft {
        PostDraft {
            text: text.to_string(),
            group_id,
        }
    }

    #[test]
    fn revise_keeps_identity_and_author() {
        let author = Uuid::new_v4();
        let mut post = Post::new(author, draft("first", None));
        let (id, created_at) = (post.id, post.created_at);

        let group = Uuid::new_v4();
        post.revise(draft("second", Some(group)));

        assert_eq!(post.id, id);
        assert_eq!(post.author_id, author);
        assert_eq!(post.created_at, created_at);
        assert_eq!(post.text, "second");
        assert_eq!(post.group_id, Some(group));
    }

    #[test]
    fn filter_matches_group_and_author() {
        let author = Uuid::new_v4();
        let group = Uuid::new_v4();
        let post = Post::new(author, draft("text", Some(group)));

        assert!(PostFilter::All.matches(&post));
        assert!(PostFilter::Group(group).matches(&post));
        assert!(PostFilter::Author(author).matches(&post));
        assert!(!PostFilter::Group(Uuid::new_v4()).matches(&post));
        assert!(!PostFilter::Author(Uuid::new_v4()).matches(&post));
    }
}
