//! Write views: publishing a post and editing your own.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use yatube_core::DomainError;
use yatube_core::domain::Post;
use yatube_core::forms::{FormErrors, PostForm};
use yatube_shared::dto::{GroupView, PostFormContext};

use super::context::{form_view, group_view};
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::Identity;
use crate::render::{post_detail_url, profile_url, redirect, render, templates};
use crate::state::AppState;

async fn group_choices(state: &AppState) -> AppResult<Vec<GroupView>> {
    Ok(state.groups.list_all().await?.iter().map(group_view).collect())
}

fn form_page(
    form: &PostForm,
    errors: &FormErrors,
    groups: Vec<GroupView>,
    editing: Option<Uuid>,
) -> HttpResponse {
    render(
        templates::POST_FORM,
        PostFormContext {
            form: form_view(form, errors),
            groups,
            is_edit: editing.is_some(),
            post_id: editing.map(|id| id.to_string()),
        },
    )
}

/// A post the current user may change, or the page to send them to instead.
enum Editable {
    Own(Post),
    Foreign(Uuid),
}

async fn load_editable(
    state: &AppState,
    identity: &Identity,
    post_id: Uuid,
) -> AppResult<Editable> {
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Post", post_id))?;

    if post.is_authored_by(identity.user_id) {
        Ok(Editable::Own(post))
    } else {
        tracing::debug!(
            post_id = %post_id,
            user = %identity.username,
            "Edit attempted by someone other than the author"
        );
        Ok(Editable::Foreign(post_id))
    }
}

/// GET /create/
pub async fn create_form(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let groups = group_choices(&state).await?;
    Ok(form_page(
        &PostForm::default(),
        &FormErrors::default(),
        groups,
        None,
    ))
}

/// POST /create/
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let choices = state.groups.list_all().await?;

    match form.clean(&choices) {
        Ok(draft) => {
            let post = state
                .posts
                .insert(Post::new(identity.user_id, draft))
                .await?;
            tracing::info!(post_id = %post.id, author = %identity.username, "Post published");
            Ok(redirect(&profile_url(&identity.username)))
        }
        Err(errors) => {
            tracing::debug!(author = %identity.username, "Rejected post form");
            let groups = choices.iter().map(group_view).collect();
            Ok(form_page(&form, &errors, groups, None))
        }
    }
}

/// GET /posts/{post_id}/edit/
pub async fn edit_form(
    state: web::Data<AppState>,
    identity: Identity,
    post_id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = match load_editable(&state, &identity, post_id.into_inner()).await? {
        Editable::Own(post) => post,
        Editable::Foreign(id) => return Ok(redirect(&post_detail_url(id))),
    };

    let groups = group_choices(&state).await?;
    Ok(form_page(
        &PostForm::from(&post),
        &FormErrors::default(),
        groups,
        Some(post.id),
    ))
}

/// POST /posts/{post_id}/edit/
pub async fn edit_post(
    state: web::Data<AppState>,
    identity: Identity,
    post_id: web::Path<Uuid>,
    form: Result<web::Form<PostForm>, actix_web::Error>,
) -> AppResult<HttpResponse> {
    let mut post = match load_editable(&state, &identity, post_id.into_inner()).await? {
        Editable::Own(post) => post,
        Editable::Foreign(id) => return Ok(redirect(&post_detail_url(id))),
    };

    // Body errors only surface once ownership is settled.
    let form = form
        .map_err(|e| AppError::BadRequest(e.to_string()))?
        .into_inner();
    let choices = state.groups.list_all().await?;

    match form.clean(&choices) {
        Ok(draft) => {
            post.revise(draft);
            let post = state.posts.update(post).await?;
            tracing::info!(post_id = %post.id, "Post updated");
            Ok(redirect(&post_detail_url(post.id)))
        }
        Err(errors) => {
            let groups = choices.iter().map(group_view).collect();
            Ok(form_page(&form, &errors, groups, Some(post.id)))
        }
    }
}
