//! Building view contexts from domain objects.

use std::collections::{BTreeMap, HashMap, HashSet};

use uuid::Uuid;

use yatube_core::Page;
use yatube_core::domain::{Group, Post, PostFilter, User};
use yatube_core::forms::{FormErrors, PostForm};
use yatube_shared::dto::{AuthorView, FormView, GroupView, PageView, PostView};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub fn author_view(user: &User) -> AuthorView {
    AuthorView {
        id: user.id.to_string(),
        username: user.username.clone(),
    }
}

pub fn group_view(group: &Group) -> GroupView {
    GroupView {
        id: group.id.to_string(),
        title: group.title.clone(),
        slug: group.slug.clone(),
        description: group.description.clone(),
    }
}

fn unique(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

/// Resolve authors and groups for a batch of posts with one lookup each.
pub async fn post_views(state: &AppState, posts: Vec<Post>) -> AppResult<Vec<PostView>> {
    let author_ids = unique(posts.iter().map(|p| p.author_id));
    let group_ids = unique(posts.iter().filter_map(|p| p.group_id));

    let authors: HashMap<Uuid, User> = state
        .users
        .find_by_ids(&author_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();
    let groups: HashMap<Uuid, Group> = state
        .groups
        .find_by_ids(&group_ids)
        .await?
        .into_iter()
        .map(|g| (g.id, g))
        .collect();

    posts
        .into_iter()
        .map(|post| {
            let author = authors.get(&post.author_id).ok_or_else(|| {
                AppError::Internal(format!("post {} has no author {}", post.id, post.author_id))
            })?;
            Ok(PostView {
                id: post.id.to_string(),
                text: post.text,
                created_at: post.created_at,
                author: author_view(author),
                group: post.group_id.and_then(|id| groups.get(&id)).map(group_view),
            })
        })
        .collect()
}

pub fn page_view(page: Page<PostView>) -> PageView {
    PageView {
        has_previous: page.has_previous(),
        has_next: page.has_next(),
        previous_page_number: page.previous_page_number(),
        next_page_number: page.next_page_number(),
        number: page.number,
        num_pages: page.num_pages,
        items: page.items,
    }
}

/// Count, slice and resolve one page of a feed; also returns the unsliced total.
pub async fn feed_page(
    state: &AppState,
    filter: PostFilter,
    requested: Option<i64>,
) -> AppResult<(PageView, u64)> {
    let total = state.posts.count(&filter).await?;
    let window = state.paginator.window(total, requested);
    let posts = state
        .posts
        .list(&filter, window.offset, window.limit)
        .await?;
    let items = post_views(state, posts).await?;

    Ok((page_view(window.fill(items)), total))
}

pub fn form_view(form: &PostForm, errors: &FormErrors) -> FormView {
    let mut values = BTreeMap::new();
    values.insert("text".to_string(), form.text.clone());
    values.insert("group".to_string(), form.group.clone().unwrap_or_default());

    FormView {
        values,
        errors: errors
            .iter()
            .map(|(field, messages)| (field.to_string(), messages.to_vec()))
            .collect(),
    }
}
