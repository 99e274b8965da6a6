//! Turning view contexts into responses.

use actix_web::{HttpResponse, http::header};
use serde::Serialize;
use yatube_shared::TemplateResponse;

/// Template names the views render.
pub mod templates {
    pub const INDEX: &str = "posts/index.html";
    pub const GROUP_LIST: &str = "posts/group_list.html";
    pub const PROFILE: &str = "posts/profile.html";
    pub const POST_DETAIL: &str = "posts/post_detail.html";
    pub const POST_FORM: &str = "posts/post_create.html";
    pub const LOGIN: &str = "users/login.html";
    pub const SIGNUP: &str = "users/signup.html";
}

/// `200 OK` with the template name and its context.
pub fn render<C: Serialize>(template: &str, context: C) -> HttpResponse {
    HttpResponse::Ok().json(TemplateResponse::new(template, context))
}

/// `302 Found` to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn profile_url(username: &str) -> String {
    format!("/profile/{}/", username)
}

pub fn post_detail_url(post_id: uuid::Uuid) -> String {
    format!("/posts/{}/", post_id)
}
