//! HTTP handlers and route configuration.

pub mod auth;
mod context;
pub mod feeds;
pub mod health;
pub mod posts;

use actix_web::web;

use crate::middleware::gate::LoginRequired;

/// Configure all application routes; write routes sit behind the login gate.
pub fn routes(login_url: String) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.route("/", web::get().to(feeds::index))
            .route("/group/{slug}/", web::get().to(feeds::group_posts))
            .route("/profile/{username}/", web::get().to(feeds::profile))
            .service(
                web::resource("/create/")
                    .wrap(LoginRequired::new(login_url.clone()))
                    .route(web::get().to(posts::create_form))
                    .route(web::post().to(posts::create_post)),
            )
            .service(
                web::resource("/posts/{post_id}/edit/")
                    .wrap(LoginRequired::new(login_url))
                    .route(web::get().to(posts::edit_form))
                    .route(web::post().to(posts::edit_post)),
            )
            .route("/posts/{post_id}/", web::get().to(feeds::post_detail))
            .service(
                web::scope("/auth")
                    .service(
                        web::resource("/login/")
                            .route(web::get().to(auth::login_form))
                            .route(web::post().to(auth::login)),
                    )
                    .service(
                        web::resource("/signup/")
                            .route(web::get().to(auth::signup_form))
                            .route(web::post().to(auth::signup)),
                    )
                    .route("/logout/", web::get().to(auth::logout)),
            )
            .route("/api/health", web::get().to(health::health_check));
    }
}
