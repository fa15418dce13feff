use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// The identity of the caller, taken from the claims `AuthMiddleware` verified.
///
/// Only usable on routes behind `AuthMiddleware`. If the claims are absent the
/// extractor fails with 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub username: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedUser {
                user_id: claims.user_id,
                username: claims.username.clone(),
            })),
            None => {
                let err = AppError::Unauthorized("No user ID in token".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
