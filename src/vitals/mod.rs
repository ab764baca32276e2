use std::fmt;
use serde::{Deserialize, Serialize};

pub mod reference;
pub mod aggregator;
pub mod classifier;
pub mod advice;
pub mod personalization;

/// The five channels reported by the sensor.
/// Declaration order is the tie-break order used when ranking advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VitalChannel {
    HeartRate,
    Oxygen,
    #[serde(rename = "temperature")]
    BodyTemperature,
    RoomTemperature,
    Humidity,
}

impl VitalChannel {
    pub const ALL: [VitalChannel; 5] = [
        VitalChannel::HeartRate,
        VitalChannel::Oxygen,
        VitalChannel::BodyTemperature,
        VitalChannel::RoomTemperature,
        VitalChannel::Humidity,
    ];

    /// Key used by the measurement API and by advice items.
    pub fn key(&self) -> &'static str {
        match self {
            VitalChannel::HeartRate => "heartRate",
            VitalChannel::Oxygen => "oxygen",
            VitalChannel::BodyTemperature => "temperature",
            VitalChannel::RoomTemperature => "roomTemperature",
            VitalChannel::Humidity => "humidity",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VitalChannel::HeartRate => "Heart rate",
            VitalChannel::Oxygen => "Oxygen saturation",
            VitalChannel::BodyTemperature => "Body temperature",
            VitalChannel::RoomTemperature => "Room temperature",
            VitalChannel::Humidity => "Humidity",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            VitalChannel::HeartRate => "bpm",
            VitalChannel::Oxygen | VitalChannel::Humidity => "%",
            VitalChannel::BodyTemperature | VitalChannel::RoomTemperature => "°C",
        }
    }

    /// Icon token handed to the view layer.
    pub fn icon(&self) -> &'static str {
        match self {
            VitalChannel::HeartRate => "heartbeat",
            VitalChannel::Oxygen => "lungs",
            VitalChannel::BodyTemperature => "thermostat",
            VitalChannel::RoomTemperature => "thermostat-auto",
            VitalChannel::Humidity => "water-percent",
        }
    }

    /// Heart rate and oxygen are reported in whole units, the rest with one decimal.
    pub fn decimals(&self) -> u32 {
        match self {
            VitalChannel::HeartRate | VitalChannel::Oxygen => 0,
            _ => 1,
        }
    }

    /// Renders a value with the channel's precision and unit, e.g. `72 bpm` or `36.8 °C`.
    pub fn format_value(&self, value: f64) -> String {
        format!("{:.*} {}", self.decimals() as usize, value, self.unit())
    }
}

impl fmt::Display for VitalChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
