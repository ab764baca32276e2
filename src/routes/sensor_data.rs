use actix_web::{get, post, web, HttpResponse};

use crate::handlers::sensor_data_handler::{get_sensor_data, store_sensor_data};
use crate::models::sensor::SensorData;
use crate::services::SensorRelay;

#[post("/data")]
async fn post_data(
    data: web::Json<SensorData>,
    relay: web::Data<SensorRelay>
) -> HttpResponse {
    store_sensor_data(data, relay).await
}

#[get("/data")]
async fn get_data(relay: web::Data<SensorRelay>) -> HttpResponse {
    get_sensor_data(relay).await
}
