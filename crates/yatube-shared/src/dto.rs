//! View contexts - the data each page template is rendered with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Public information about a post author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorView {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupView {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// A post with its author and group resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author: AuthorView,
    pub group: Option<GroupView>,
}

/// One page of a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    pub items: Vec<PostView>,
    pub number: u64,
    pub num_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<u64>,
    pub next_page_number: Option<u64>,
}

/// `posts/index.html`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexContext {
    pub page: PageView,
    pub total_item_count: u64,
}

/// `posts/group_list.html`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupFeedContext {
    pub group: GroupView,
    pub page: PageView,
    pub total_item_count: u64,
}

/// `posts/profile.html`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileContext {
    pub author: AuthorView,
    pub page: PageView,
    pub total_item_count: u64,
}

/// `posts/post_detail.html`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailContext {
    pub post: PostView,
    pub title: String,
    pub author_post_count: u64,
}

/// Submitted (or pre-filled) form values plus per-field errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormView {
    pub values: BTreeMap<String, String>,
    pub errors: BTreeMap<String, Vec<String>>,
}

/// `posts/post_create.html`, used for both creating and editing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFormContext {
    pub form: FormView,
    pub groups: Vec<GroupView>,
    pub is_edit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
}

/// `users/login.html` and `users/signup.html`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsContext {
    pub form: FormView,
}

/// Sign-in and sign-up form body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
