use actix_web::{get, HttpResponse};

use crate::handlers::backend_health_handler::relay_health_check;

/// Liveness check polled by the device and the session client.
#[get("/backend_health")]
async fn backend_health() -> HttpResponse {
    relay_health_check().await
}
