use crate::{
    auth::{hash_password, verify_password, Credentials, TokenResponse},
    error::AppError,
    routes::{storage_failure, MessageResponse},
    state::AppState,
    store::StoreError,
};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// Hashes the password and inserts the user. The store enforces username
/// uniqueness, so a taken name comes back as a conflict from the insert itself.
///
/// ## Responses:
/// - `200 OK`: `{"message": "User created successfully"}`.
/// - `400 Bad Request`: body is not `{username, password}` JSON.
/// - `409 Conflict`: the username already exists.
/// - `500 Internal Server Error`: hashing or storage failed.
#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    let Credentials { username, password } = credentials.into_inner();

    // bcrypt is deliberately slow; keep it off the async workers.
    let cost = state.bcrypt_cost;
    let password_hash = web::block(move || hash_password(&password, cost))
        .await
        .map_err(|e| {
            log::error!("password hashing task failed: {}", e);
            AppError::InternalServerError("Could not hash password".into())
        })??;

    match state.users.create_user(&username, &password_hash).await {
        Ok(user) => {
            log::info!("created user {} (id {})", user.username, user.id);
            Ok(HttpResponse::Ok().json(MessageResponse::new("User created successfully")))
        }
        Err(StoreError::Conflict(_)) => {
            log::info!("signup rejected, username {:?} is taken", username);
            Err(AppError::Conflict("Username already exists".into()))
        }
        Err(e) => Err(storage_failure(e, "Could not create user")),
    }
}

/// Login user
///
/// Checks the password against the stored hash and returns a signed token. An
/// unknown username and a wrong password get the same 401, and both run one
/// bcrypt verification.
///
/// ## Responses:
/// - `200 OK`: `{"token": "..."}`.
/// - `400 Bad Request`: body is not `{username, password}` JSON.
/// - `401 Unauthorized`: unknown user or wrong password.
/// - `500 Internal Server Error`: storage or token signing failed.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    let Credentials { username, password } = credentials.into_inner();

    let user = match state.users.find_by_username(&username).await {
        Ok(user) => user,
        Err(StoreError::NotFound) => {
            let decoy = state.unknown_user_hash.clone();
            let cost = state.bcrypt_cost;
            blocking_verify(move || {
                let hash = decoy.get_or_init(|| {
                    hash_password(UNKNOWN_USER_PASSWORD, cost).unwrap_or_default()
                });
                verify_password(&password, hash)
            })
            .await?;
            log::info!("failed login for unknown username");
            return Err(AppError::Unauthorized("Invalid credentials".into()));
        }
        Err(e) => return Err(storage_failure(e, "Could not fetch user")),
    };

    let stored_hash = user.password_hash.clone();
    let matches = blocking_verify(move || verify_password(&password, &stored_hash)).await?;

    if !matches {
        log::info!("failed login for user id {}", user.id);
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let token = state.tokens.issue(user.id, &user.username)?;
    log::info!("user id {} logged in", user.id);

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// Plaintext behind the unknown-user hash. Its value is irrelevant; the result of
/// that verification is always discarded.
const UNKNOWN_USER_PASSWORD: &str = "no such user";

/// Runs a bcrypt check on the blocking pool.
async fn blocking_verify<F>(check: F) -> Result<bool, AppError>
where
    F: FnOnce() -> bool + Send + 'static,
{
    web::block(check).await.map_err(|e| {
        log::error!("password verification task failed: {}", e);
        AppError::InternalServerError("Could not verify password".into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::json_config;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::in_memory("route-test-secret", 4))
    }

    #[actix_rt::test]
    async fn test_signup_rejects_bad_body() {
        let app = test::init_service(
            App::new()
                .app_data(state())
                .app_data(json_config())
                .service(signup),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/signup")
            .set_json(json!({ "username": "no-password" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid request body");
    }

    #[actix_rt::test]
    async fn test_login_unknown_user_is_unauthorized() {
        let state = state();
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .app_data(json_config())
                .service(login),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": "ghost", "password": "boo" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid credentials");

        // The unknown-user path paid for a real bcrypt hash at the configured cost.
        let decoy = state.unknown_user_hash.get().expect("decoy hash was built");
        assert!(decoy.starts_with("$2b$04$"), "unexpected hash {}", decoy);
        assert!(verify_password(UNKNOWN_USER_PASSWORD, decoy));
    }
}
