use std::net::TcpListener;

use health_monitor::run;
use health_monitor::config::settings::get_config;
use health_monitor::services::SensorRelay;
use health_monitor::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "health-monitor".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let relay = SensorRelay::new(&config.relay);
    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("📡 Sensor relay listening on {}", address);

    run(listener, relay)?.await
}
