pub mod auth;
pub mod index;
pub mod tasks;

use actix_web::web;
use serde::{Deserialize, Serialize};

use crate::auth::AuthMiddleware;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::StoreError;

/// Registers the whole HTTP surface on an `App`.
///
/// `/`, `/signup` and `/login` are public. Everything under `/tasks` goes through
/// `AuthMiddleware` first.
pub fn configure(cfg: &mut web::ServiceConfig, state: web::Data<AppState>) {
    let require_token = AuthMiddleware::new(state.tokens.clone());

    cfg.app_data(state)
        .app_data(json_config())
        .service(index::index)
        .service(auth::signup)
        .service(auth::login)
        .service(
            web::scope("/tasks")
                .wrap(require_token)
                .service(tasks::create_task)
                .service(tasks::list_tasks),
        );
}

/// Any body that fails to parse as the expected JSON is a 400 with a fixed message.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::debug!("rejected request body on {}: {}", req.path(), err);
        AppError::BadRequest("Invalid request body".into()).into()
    })
}

/// Response carrying a human-readable confirmation.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Logs a backend failure and replaces it with a generic 500.
pub(crate) fn storage_failure(error: StoreError, message: &str) -> AppError {
    log::error!("{}: {}", message, error);
    AppError::DatabaseError(message.to_string())
}
