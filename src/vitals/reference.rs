use crate::vitals::VitalChannel;

/// Classification thresholds for one channel, all in the channel's unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalReferenceEntry {
    pub critical_low: f64,
    pub warning_low: f64,
    pub good_low: f64,
    pub good_high: f64,
    pub warning_high: f64,
    pub critical_high: f64,
}

impl VitalReferenceEntry {
    pub const fn new(
        critical_low: f64,
        warning_low: f64,
        good_low: f64,
        good_high: f64,
        warning_high: f64,
        critical_high: f64,
    ) -> Self {
        Self {
            critical_low,
            warning_low,
            good_low,
            good_high,
            warning_high,
            critical_high,
        }
    }

    /// criticalLow <= warningLow <= goodLow <= goodHigh <= warningHigh <= criticalHigh
    pub fn is_ordered(&self) -> bool {
        self.critical_low <= self.warning_low
            && self.warning_low <= self.good_low
            && self.good_low <= self.good_high
            && self.good_high <= self.warning_high
            && self.warning_high <= self.critical_high
    }

    pub fn in_good_range(&self, value: f64) -> bool {
        value >= self.good_low && value <= self.good_high
    }
}

pub const HEART_RATE_REFERENCE: VitalReferenceEntry =
    VitalReferenceEntry::new(40.0, 50.0, 60.0, 100.0, 120.0, 150.0);

// SpO2 cannot exceed 100 %, the high thresholds sit above it.
pub const OXYGEN_REFERENCE: VitalReferenceEntry =
    VitalReferenceEntry::new(88.0, 92.0, 95.0, 100.0, 101.0, 102.0);

pub const BODY_TEMPERATURE_REFERENCE: VitalReferenceEntry =
    VitalReferenceEntry::new(35.0, 35.5, 36.1, 37.2, 38.0, 39.5);

pub const ROOM_TEMPERATURE_REFERENCE: VitalReferenceEntry =
    VitalReferenceEntry::new(10.0, 16.0, 20.0, 25.0, 28.0, 35.0);

pub const HUMIDITY_REFERENCE: VitalReferenceEntry =
    VitalReferenceEntry::new(15.0, 25.0, 30.0, 60.0, 70.0, 85.0);

pub fn reference_for(channel: VitalChannel) -> &'static VitalReferenceEntry {
    match channel {
        VitalChannel::HeartRate => &HEART_RATE_REFERENCE,
        VitalChannel::Oxygen => &OXYGEN_REFERENCE,
        VitalChannel::BodyTemperature => &BODY_TEMPERATURE_REFERENCE,
        VitalChannel::RoomTemperature => &ROOM_TEMPERATURE_REFERENCE,
        VitalChannel::Humidity => &HUMIDITY_REFERENCE,
    }
}
