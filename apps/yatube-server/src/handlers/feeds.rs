//! Public read views: the global feed, group and author feeds, and post detail.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

use yatube_core::DomainError;
use yatube_core::domain::PostFilter;
use yatube_core::pagination::parse_page_number;
use yatube_shared::dto::{GroupFeedContext, IndexContext, PostDetailContext, ProfileContext};

use super::context::{author_view, feed_page, group_view, post_views};
use crate::middleware::error::{AppError, AppResult};
use crate::render::{render, templates};
use crate::state::AppState;

/// `?page=` query string shared by every feed.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

impl PageQuery {
    fn requested(&self) -> Option<i64> {
        parse_page_number(self.page.as_deref())
    }
}

/// GET /
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let (page, total_item_count) = feed_page(&state, PostFilter::All, query.requested()).await?;

    Ok(render(
        templates::INDEX,
        IndexContext {
            page,
            total_item_count,
        },
    ))
}

/// GET /group/{slug}/
pub async fn group_posts(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let group = state
        .groups
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| DomainError::not_found("Group", slug.as_str()))?;

    let (page, total_item_count) =
        feed_page(&state, PostFilter::Group(group.id), query.requested()).await?;

    Ok(render(
        templates::GROUP_LIST,
        GroupFeedContext {
            group: group_view(&group),
            page,
            total_item_count,
        },
    ))
}

/// GET /profile/{username}/
pub async fn profile(
    state: web::Data<AppState>,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let author = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| DomainError::not_found("User", username.as_str()))?;

    let (page, total_item_count) =
        feed_page(&state, PostFilter::Author(author.id), query.requested()).await?;

    Ok(render(
        templates::PROFILE,
        ProfileContext {
            author: author_view(&author),
            page,
            total_item_count,
        },
    ))
}

/// GET /posts/{post_id}/
pub async fn post_detail(
    state: web::Data<AppState>,
    post_id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = post_id.into_inner();
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Post", post_id))?;

    // Across all pages, not just the one the post would appear on.
    let author_post_count = state
        .posts
        .count(&PostFilter::Author(post.author_id))
        .await?;

    let title = post.text.clone();
    let post = post_views(&state, vec![post])
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal(format!("post {} vanished while rendering", post_id)))?;

    Ok(render(
        templates::POST_DETAIL,
        PostDetailContext {
            post,
            title,
            author_post_count,
        },
    ))
}
