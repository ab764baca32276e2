use serde::{Deserialize, Serialize};

use crate::vitals::VitalChannel;

/// Reading as the sensor endpoint sends it.
/// `temperature` carries the body temperature, `bodyTemperature` the room temperature.
/// Every field is required: a reading missing one is rejected, not zero-filled.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorData {
    pub bpm: f64,
    pub spo2: f64,
    pub humidity: f64,
    #[serde(rename = "bodyTemperature")]
    pub body_temperature: f64,
    pub temperature: f64,
}

/// One polled reading, mapped onto vital channels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SensorSample {
    pub heart_rate: f64,
    pub oxygen_saturation: f64,
    pub body_temperature: f64,
    pub room_temperature: f64,
    pub humidity: f64,
}

impl SensorSample {
    /// Heart rate above zero means a finger is on the sensor.
    pub fn is_valid(&self) -> bool {
        self.heart_rate > 0.0
    }

    pub fn value(&self, channel: VitalChannel) -> f64 {
        match channel {
            VitalChannel::HeartRate => self.heart_rate,
            VitalChannel::Oxygen => self.oxygen_saturation,
            VitalChannel::BodyTemperature => self.body_temperature,
            VitalChannel::RoomTemperature => self.room_temperature,
            VitalChannel::Humidity => self.humidity,
        }
    }
}

impl From<SensorData> for SensorSample {
    fn from(data: SensorData) -> Self {
        Self {
            heart_rate: data.bpm,
            oxygen_saturation: data.spo2,
            body_temperature: data.temperature,
            room_temperature: data.body_temperature,
            humidity: data.humidity,
        }
    }
}

impl From<SensorSample> for SensorData {
    fn from(sample: SensorSample) -> Self {
        Self {
            bpm: sample.heart_rate,
            spo2: sample.oxygen_saturation,
            humidity: sample.humidity,
            body_temperature: sample.room_temperature,
            temperature: sample.body_temperature,
        }
    }
}
