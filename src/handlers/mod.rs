use actix_web::{HttpResponse, Responder, get};

pub mod auth;
pub mod locations;
pub mod shared;
pub mod shifts;
pub mod users;

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}
