pub mod backend_health_handler;
pub mod sensor_data_handler;
