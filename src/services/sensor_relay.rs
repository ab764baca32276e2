use tokio::sync::RwLock;

use crate::config::relay::RelaySettings;
use crate::models::sensor::SensorData;

/// Latest reading pushed by the device, served to polling clients.
pub struct SensorRelay {
    latest: RwLock<SensorData>,
    min_valid_bpm: f64,
}

impl SensorRelay {
    pub fn new(settings: &RelaySettings) -> Self {
        Self {
            latest: RwLock::new(SensorData::default()),
            min_valid_bpm: settings.min_valid_bpm,
        }
    }

    pub async fn store(&self, data: SensorData) -> SensorData {
        let mut latest = self.latest.write().await;
        *latest = data;
        data
    }

    /// Heart rates below the threshold are reported as 0 ("no finger").
    pub async fn current(&self) -> SensorData {
        let mut data = *self.latest.read().await;
        if data.bpm < self.min_valid_bpm {
            data.bpm = 0.0;
        }
        data
    }
}
