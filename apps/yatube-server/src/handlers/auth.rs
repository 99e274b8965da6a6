//! Session handlers: sign up, sign in, sign out.

use actix_web::{HttpResponse, http::header, web};
use std::collections::BTreeMap;
use std::sync::Arc;

use yatube_core::domain::User;
use yatube_core::error::RepoError;
use yatube_core::forms::FormErrors;
use yatube_core::ports::{PasswordService, TokenService};
use yatube_shared::dto::{CredentialsContext, CredentialsForm, FormView};

use crate::middleware::error::{AppError, AppResult};
use crate::render::{redirect, render, templates};
use crate::state::AppState;

pub const MIN_PASSWORD_LENGTH: usize = 8;

const INVALID_LOGIN_ERROR: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";
const INVALID_USERNAME_ERROR: &str =
    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";
const TAKEN_USERNAME_ERROR: &str = "A user with that username already exists.";
const SHORT_PASSWORD_ERROR: &str =
    "This password is too short. It must contain at least 8 characters.";

/// Form errors not tied to a single field.
const NON_FIELD: &str = "__all__";

/// Re-render a credentials form. The password is never echoed back.
fn credentials_page(template: &str, username: &str, errors: &FormErrors) -> HttpResponse {
    let mut values = BTreeMap::new();
    values.insert("username".to_string(), username.to_string());

    render(
        template,
        CredentialsContext {
            form: FormView {
                values,
                errors: errors
                    .iter()
                    .map(|(field, messages)| (field.to_string(), messages.to_vec()))
                    .collect(),
            },
        },
    )
}

/// Issue a session token for `user` and send them to the index.
fn start_session(
    state: &AppState,
    token_service: &dyn TokenService,
    user: &User,
) -> AppResult<HttpResponse> {
    let token = token_service
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .cookie(
            state
                .session
                .session_cookie(token, token_service.expiration_seconds()),
        )
        .finish())
}

/// GET /auth/login/
pub async fn login_form() -> HttpResponse {
    credentials_page(templates::LOGIN, "", &FormErrors::default())
}

/// POST /auth/login/
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    form: web::Form<CredentialsForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let username = form.username.trim();

    let user = match state.users.find_by_username(username).await? {
        Some(user) => {
            let valid = password_service
                .verify(&form.password, &user.password_hash)
                .map_err(|e| AppError::Internal(e.to_string()))?;
            valid.then_some(user)
        }
        None => None,
    };

    match user {
        Some(user) => {
            tracing::info!(user = %user.username, "Signed in");
            start_session(&state, token_service.get_ref().as_ref(), &user)
        }
        None => {
            tracing::debug!(user = %username, "Sign in rejected");
            let mut errors = FormErrors::default();
            errors.add(NON_FIELD, INVALID_LOGIN_ERROR);
            Ok(credentials_page(templates::LOGIN, username, &errors))
        }
    }
}

/// GET /auth/signup/
pub async fn signup_form() -> HttpResponse {
    credentials_page(templates::SIGNUP, "", &FormErrors::default())
}

/// POST /auth/signup/
pub async fn signup(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    form: web::Form<CredentialsForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let username = form.username.trim();
    let mut errors = FormErrors::default();

    if !User::is_valid_username(username) {
        errors.add("username", INVALID_USERNAME_ERROR);
    } else if state.users.find_by_username(username).await?.is_some() {
        errors.add("username", TAKEN_USERNAME_ERROR);
    }
    if form.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add("password", SHORT_PASSWORD_ERROR);
    }

    if !errors.is_empty() {
        return Ok(credentials_page(templates::SIGNUP, username, &errors));
    }

    let password_hash = password_service
        .hash(&form.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = match state
        .users
        .insert(User::new(username.to_string(), password_hash))
        .await
    {
        Ok(user) => user,
        // Lost a race with a concurrent signup for the same name.
        Err(RepoError::Constraint(_)) => {
            errors.add("username", TAKEN_USERNAME_ERROR);
            return Ok(credentials_page(templates::SIGNUP, username, &errors));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(user = %user.username, "User registered");
    start_session(&state, token_service.get_ref().as_ref(), &user)
}

/// GET /auth/logout/
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    let mut response = redirect("/");
    if let Err(e) = response.add_cookie(&state.session.removal_cookie()) {
        tracing::warn!("Failed to clear session cookie: {}", e);
    }
    response
}
