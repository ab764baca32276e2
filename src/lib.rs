use actix_web::{web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use std::net::TcpListener;

pub mod config;
pub mod telemetry;
mod routes;
mod handlers;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;
pub mod vitals;
use crate::routes::init_routes;
use crate::services::SensorRelay;

pub fn run(
    listener: TcpListener,
    relay: SensorRelay,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let relay = web::Data::new(relay);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            // Get a pointer copy and attach it to the application state
            .app_data(relay.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
