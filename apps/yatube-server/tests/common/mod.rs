//! Shared fixtures: an in-memory store, session tokens, and an app builder.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::cookie::Cookie;
use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use yatube_core::Paginator;
use yatube_core::domain::{Group, Post, PostDraft, PostFilter, User};
use yatube_core::ports::{BaseRepository, PasswordService, PostRepository, TokenService};
use yatube_infra::{Argon2PasswordService, InMemoryDatabase, JwtConfig, JwtTokenService};
use yatube_server::middleware::session::{SESSION_COOKIE, SessionSettings};
use yatube_server::state::AppState;

pub const LOGIN_URL: &str = "/auth/login/";

pub struct TestContext {
    pub db: Arc<InMemoryDatabase>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

impl TestContext {
    pub fn new() -> Self {
        let jwt = JwtConfig {
            secret: "a".repeat(32),
            ..JwtConfig::default()
        };
        Self {
            db: Arc::new(InMemoryDatabase::new()),
            tokens: Arc::new(JwtTokenService::new(jwt)),
            passwords: Arc::new(Argon2PasswordService::default()),
        }
    }

    pub fn state(&self) -> AppState {
        AppState::in_memory(
            self.db.clone(),
            Paginator::default(),
            SessionSettings::default(),
        )
    }

    pub async fn user(&self, username: &str) -> User {
        let user = User::new(username.to_string(), "unusable".to_string());
        BaseRepository::<User, Uuid>::insert(self.db.as_ref(), user)
            .await
            .unwrap()
    }

    /// A user who can actually sign in with `password`.
    pub async fn user_with_password(&self, username: &str, password: &str) -> User {
        let hash = self.passwords.hash(password).unwrap();
        let user = User::new(username.to_string(), hash);
        BaseRepository::<User, Uuid>::insert(self.db.as_ref(), user)
            .await
            .unwrap()
    }

    pub async fn group(&self, title: &str, slug: &str) -> Group {
        let group = Group::new(
            title.to_string(),
            slug.to_string(),
            "test-description".to_string(),
        );
        BaseRepository::<Group, Uuid>::insert(self.db.as_ref(), group)
            .await
            .unwrap()
    }

    /// Insert a post backdated by `minutes_ago` so feed order is deterministic.
    pub async fn post(
        &self,
        author: &User,
        text: &str,
        group: Option<&Group>,
        minutes_ago: i64,
    ) -> Post {
        let mut post = Post::new(
            author.id,
            PostDraft {
                text: text.to_string(),
                group_id: group.map(|g| g.id),
            },
        );
        post.created_at = Utc::now() - TimeDelta::minutes(minutes_ago);
        BaseRepository::<Post, Uuid>::insert(self.db.as_ref(), post)
            .await
            .unwrap()
    }

    pub async fn stored_post(&self, id: Uuid) -> Option<Post> {
        BaseRepository::<Post, Uuid>::find_by_id(self.db.as_ref(), id)
            .await
            .unwrap()
    }

    pub async fn post_count(&self) -> u64 {
        self.db.count(&PostFilter::All).await.unwrap()
    }

    pub fn session_for(&self, user: &User) -> Cookie<'static> {
        let token = self.tokens.generate_token(user.id, &user.username).unwrap();
        Cookie::new(SESSION_COOKIE, token)
    }
}

/// Build the full route table over `ctx`'s in-memory state.
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($ctx.state()))
                .app_data(actix_web::web::Data::new($ctx.tokens.clone()))
                .app_data(actix_web::web::Data::new($ctx.passwords.clone()))
                .configure(yatube_server::handlers::routes(
                    common::LOGIN_URL.to_string(),
                )),
        )
        .await
    };
}

pub fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> String {
    resp.headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
