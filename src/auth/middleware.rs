use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::sync::Arc;

use crate::auth::token::TokenService;
use crate::error::AppError;

/// Gates a scope behind a valid token.
///
/// The token is the raw value of the `Authorization` header; no `Bearer ` scheme is
/// expected or stripped. On success the verified [`Claims`](crate::auth::Claims) are
/// placed in the request extensions. On failure the request is answered here with a
/// 401 and never reaches the wrapped service.
pub struct AuthMiddleware {
    tokens: Arc<TokenService>,
}

impl AuthMiddleware {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            tokens: Arc::clone(&self.tokens),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    tokens: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .filter(|value| !value.is_empty())
            // A present value that is not visible ASCII cannot be a token; verifying
            // "" rejects it as invalid rather than missing.
            .map(|value| value.to_str().unwrap_or_default());

        let rejection = match token {
            None => AppError::Unauthorized("Missing token".into()),
            Some(token) => match self.tokens.verify(token) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let fut = self.service.call(req);
                    return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
                }
                Err(e) => {
                    log::debug!("rejected token on {}: {}", req.path(), e);
                    AppError::from(e)
                }
            },
        };

        let response = req.into_response(rejection.error_response());
        Box::pin(async move { Ok(response.map_into_right_body()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Claims;
    use actix_web::{http::StatusCode, test, web, App, HttpRequest, HttpResponse};
    use chrono::Duration;

    async fn whoami(req: HttpRequest) -> HttpResponse {
        match req.extensions().get::<Claims>() {
            Some(claims) => HttpResponse::Ok().body(claims.username.clone()),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new(b"middleware-secret", Duration::hours(24)))
    }

    #[actix_rt::test]
    async fn test_valid_token_reaches_handler_with_claims() {
        let tokens = tokens();
        let token = tokens.issue(5, "dora").unwrap();
        let app = test::init_service(
            App::new().service(
                web::resource("/me")
                    .wrap(AuthMiddleware::new(tokens.clone()))
                    .to(whoami),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header((header::AUTHORIZATION, token))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "dora");
    }

    #[actix_rt::test]
    async fn test_missing_and_invalid_tokens_are_rejected() {
        let tokens = tokens();
        let app = test::init_service(
            App::new().service(
                web::resource("/me")
                    .wrap(AuthMiddleware::new(tokens.clone()))
                    .to(whoami),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Missing token");

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header((header::AUTHORIZATION, "garbage"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid token");
    }

    #[actix_rt::test]
    async fn test_undecodable_header_is_an_invalid_token() {
        let app = test::init_service(
            App::new().service(
                web::resource("/me")
                    .wrap(AuthMiddleware::new(tokens()))
                    .to(whoami),
            ),
        )
        .await;

        let value = header::HeaderValue::from_bytes(b"\xfftoken\xe9").unwrap();
        assert!(value.to_str().is_err());

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header((header::AUTHORIZATION, value))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid token");
    }

    #[actix_rt::test]
    async fn test_bearer_scheme_is_not_accepted() {
        let tokens = tokens();
        let token = tokens.issue(5, "dora").unwrap();
        let app = test::init_service(
            App::new().service(
                web::resource("/me")
                    .wrap(AuthMiddleware::new(tokens.clone()))
                    .to(whoami),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
