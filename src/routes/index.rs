use actix_web::{get, HttpResponse, Responder};

/// Plain-text greeting at the root, handy as a liveness check.
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Hello from taskledger!")
}
