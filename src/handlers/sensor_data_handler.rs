use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::models::sensor::SensorData;
use crate::services::SensorRelay;

#[tracing::instrument(
    name = "Store sensor reading",
    skip(data, relay),
    fields(bpm = %data.bpm, spo2 = %data.spo2)
)]
pub async fn store_sensor_data(
    data: web::Json<SensorData>,
    relay: web::Data<SensorRelay>
) -> HttpResponse {
    let stored = relay.store(data.into_inner()).await;
    tracing::debug!("📥 Sensor reading stored");

    HttpResponse::Ok().json(json!({
        "status": "success",
        "data": stored
    }))
}

#[tracing::instrument(name = "Serve sensor reading", skip(relay))]
pub async fn get_sensor_data(relay: web::Data<SensorRelay>) -> HttpResponse {
    HttpResponse::Ok().json(relay.current().await)
}
