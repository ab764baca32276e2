use std::fmt;
use serde::{Deserialize, Serialize};

use crate::vitals::reference::{reference_for, VitalReferenceEntry};
use crate::vitals::VitalChannel;

/// Ordered by clinical urgency: `Good < Mild < Warning < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Good,
    Mild,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Good => "good",
            Severity::Mild => "mild",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity plus the side of the good range the value fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Band {
    CriticalLow,
    WarningLow,
    MildLow,
    Good,
    MildHigh,
    WarningHigh,
    CriticalHigh,
}

impl Band {
    pub fn severity(&self) -> Severity {
        match self {
            Band::CriticalLow | Band::CriticalHigh => Severity::Critical,
            Band::WarningLow | Band::WarningHigh => Severity::Warning,
            Band::MildLow | Band::MildHigh => Severity::Mild,
            Band::Good => Severity::Good,
        }
    }

    pub fn is_low(&self) -> bool {
        matches!(self, Band::CriticalLow | Band::WarningLow | Band::MildLow)
    }

    /// Short phrase used in advice titles.
    pub fn describe(&self) -> &'static str {
        match self {
            Band::CriticalLow => "critically low",
            Band::WarningLow => "low",
            Band::MildLow => "slightly low",
            Band::Good => "normal",
            Band::MildHigh => "slightly high",
            Band::WarningHigh => "high",
            Band::CriticalHigh => "critically high",
        }
    }
}

/// First match wins: critical, then warning, then mild, then good.
/// Critical and warning boundaries are inclusive; the good range is inclusive of itself.
pub fn classify_band(value: f64, reference: &VitalReferenceEntry) -> Band {
    if value <= reference.critical_low {
        Band::CriticalLow
    } else if value >= reference.critical_high {
        Band::CriticalHigh
    } else if value <= reference.warning_low {
        Band::WarningLow
    } else if value >= reference.warning_high {
        Band::WarningHigh
    } else if value < reference.good_low {
        Band::MildLow
    } else if value > reference.good_high {
        Band::MildHigh
    } else {
        Band::Good
    }
}

pub fn classify(value: f64, reference: &VitalReferenceEntry) -> Severity {
    classify_band(value, reference).severity()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub band: Band,
    pub severity: Severity,
    pub message: &'static str,
}

/// Classifies a channel value against the static reference table.
pub fn evaluate(channel: VitalChannel, value: f64) -> Classification {
    let band = classify_band(value, reference_for(channel));
    Classification {
        band,
        severity: band.severity(),
        message: advisory_message(channel, band),
    }
}

pub fn advisory_message(channel: VitalChannel, band: Band) -> &'static str {
    use Band::*;
    use VitalChannel::*;

    match (channel, band) {
        (HeartRate, CriticalLow) => "Your heart rate is dangerously low. Sit down, stay calm and seek medical help right away if you feel faint.",
        (HeartRate, WarningLow) => "Your heart rate is well below the usual range. If you feel dizzy or short of breath, contact a doctor.",
        (HeartRate, MildLow) => "A low heart rate can be normal for athletes. If you feel dizzy or weak, consider talking to a doctor.",
        (HeartRate, Good) => "Your heart rate is in a healthy range. Regular exercise helps maintain a strong heart.",
        (HeartRate, MildHigh) => "A high heart rate can be caused by stress or exercise. Try some deep breathing exercises to help it return to normal.",
        (HeartRate, WarningHigh) => "Your heart rate is elevated at rest. Rest, hydrate and measure again in a few minutes.",
        (HeartRate, CriticalHigh) => "Your heart rate is dangerously high. Stop any activity and seek medical attention if it does not come down.",

        (Oxygen, CriticalLow) => "Your oxygen saturation is critically low. Seek emergency medical attention.",
        (Oxygen, WarningLow) => "Low oxygen levels can be serious. Ensure good ventilation or try some deep, slow breaths. Seek medical attention if it persists.",
        (Oxygen, MildLow) => "Your oxygen saturation is slightly below normal. Sit upright and take a few slow, deep breaths.",
        (Oxygen, Good) => "Your oxygen saturation is excellent. Keep up the healthy habits!",
        (Oxygen, MildHigh) => "High oxygen levels are generally not a concern unless using supplemental oxygen.",
        (Oxygen, WarningHigh) => "Your oxygen reading is above what the sensor normally reports. Reposition your finger and measure again.",
        (Oxygen, CriticalHigh) => "Your oxygen reading is implausibly high. Check the sensor, and if you are on supplemental oxygen ask your doctor about the flow rate.",

        (BodyTemperature, CriticalLow) => "Your body temperature is dangerously low. Warm up immediately and seek medical help.",
        (BodyTemperature, WarningLow) => "Your body temperature is low. Move to a warm place and consider consulting a doctor.",
        (BodyTemperature, MildLow) => "Low body temperature? Make sure you are in a warm environment and wearing enough layers.",
        (BodyTemperature, Good) => "Your body temperature is normal. Your body is effectively regulating its internal thermostat.",
        (BodyTemperature, MildHigh) => "A high body temperature may indicate a fever. Rest and drink plenty of fluids.",
        (BodyTemperature, WarningHigh) => "You have a fever. Rest, drink plenty of fluids and contact a doctor if it keeps rising.",
        (BodyTemperature, CriticalHigh) => "Your body temperature is dangerously high. Seek medical attention right away.",

        (RoomTemperature, CriticalLow) => "The room is very cold. Heat the room before measuring again.",
        (RoomTemperature, WarningLow) => "The room is cold. Consider warming up the room.",
        (RoomTemperature, MildLow) => "The room is a bit cool. A stable, comfortable room temperature can improve sleep quality.",
        (RoomTemperature, Good) => "The room temperature is ideal. A comfortable environment is great for relaxation and focus.",
        (RoomTemperature, MildHigh) => "The room is a bit warm. Consider improving ventilation for better comfort and air quality.",
        (RoomTemperature, WarningHigh) => "The room is hot. Consider cooling the room.",
        (RoomTemperature, CriticalHigh) => "The room is dangerously hot. Cool down the room and stay hydrated.",

        (Humidity, CriticalLow) => "The air is extremely dry. Use a humidifier and drink plenty of water.",
        (Humidity, WarningLow) => "The air is dry. A humidifier can help protect your skin and airways.",
        (Humidity, MildLow) => "Low humidity can dry out your skin and airways. A humidifier can help add moisture to the air.",
        (Humidity, Good) => "The humidity level is in a comfortable range. This helps maintain respiratory health.",
        (Humidity, MildHigh) => "High humidity can make a room feel stuffy. A dehumidifier or air conditioning can improve comfort.",
        (Humidity, WarningHigh) => "The air is very humid. Ventilate the room or run a dehumidifier.",
        (Humidity, CriticalHigh) => "The humidity is extremely high. Ventilate the room to avoid mould and breathing discomfort.",
    }
}
