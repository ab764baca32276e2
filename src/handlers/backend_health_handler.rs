use actix_web::HttpResponse;
use serde_json::json;

#[tracing::instrument(name = "Relay health check")]
pub async fn relay_health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "UP"
    }))
}
