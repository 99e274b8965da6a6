//! Login gate - lets signed-in requests through, redirects everyone else.

use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;

use super::session;

/// Wrap a resource so only requests with a valid session reach it.
///
/// Anonymous requests, and sessions whose user no longer exists, get
/// `302 Found` to the login page and the wrapped handler never runs.
/// No state is kept between requests.
///
/// ```ignore
/// web::resource("/create/")
///     .wrap(LoginRequired::new("/auth/login/"))
///     .route(web::get().to(posts::create_form))
/// ```
pub struct LoginRequired {
    login_url: Rc<str>,
}

impl LoginRequired {
    pub fn new(login_url: impl Into<String>) -> Self {
        Self {
            login_url: Rc::from(login_url.into()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for LoginRequired
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = LoginRequiredService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoginRequiredService {
            service: Rc::new(service),
            login_url: self.login_url.clone(),
        }))
    }
}

pub struct LoginRequiredService<S> {
    service: Rc<S>,
    login_url: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for LoginRequiredService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let login_url = self.login_url.clone();

        Box::pin(async move {
            let identity = match session::authenticate(req.request()) {
                Ok(identity) => session::confirm(req.request(), identity).await?,
                Err(reason) => {
                    tracing::debug!(path = %req.path(), reason = %reason, "No valid session");
                    None
                }
            };

            let Some(identity) = identity else {
                tracing::debug!(
                    path = %req.path(),
                    "Anonymous request to protected route, redirecting to login"
                );
                let response = HttpResponse::Found()
                    .insert_header((header::LOCATION, login_url.as_ref()))
                    .finish();
                return Ok(req.into_response(response).map_into_right_body());
            };

            req.extensions_mut().insert(identity);
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
