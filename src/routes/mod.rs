use actix_web::web;

pub mod backend_health;
pub mod sensor_data;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health)
        .service(sensor_data::post_data)
        .service(sensor_data::get_data);
}
