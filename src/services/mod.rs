use std::future::Future;
use std::pin::Pin;

use crate::models::error::MonitorError;
use crate::models::measurement::MeasurementRequest;
use crate::models::sensor::SensorSample;

pub mod sensor_client;
pub mod measurement_client;
pub mod sensor_relay;

pub use sensor_client::SensorClient;
pub use measurement_client::MeasurementClient;
pub use sensor_relay::SensorRelay;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Where a measurement session gets its readings from.
pub trait SensorSource: Send + Sync {
    fn fetch_sample(&self) -> BoxFuture<'_, Result<SensorSample, MonitorError>>;
}

/// Where a completed session's averages are persisted.
pub trait MeasurementSink: Send + Sync {
    fn submit(&self, measurement: MeasurementRequest) -> BoxFuture<'_, Result<(), MonitorError>>;
}
