use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Averaged session values sent to `POST /measurements/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRequest {
    pub user_email: String,
    pub heart_rate: i32,
    pub oxygen: i32,
    pub temperature: f64,
    pub humidity: f64,
    pub room_temperature: f64,
}

/// One stored measurement as returned by `GET /measurements/all-by-user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub temperature: f64,
    pub heart_rate: i32,
    pub oxygen: i32,
    pub humidity: f64,
    pub room_temperature: f64,
    pub date_of_measurement: String,
}

impl MeasurementRecord {
    /// Accepts `2025-03-01T10:00:00`, `2025-03-01 10:00:00` (optional fraction) or RFC 3339.
    pub fn measured_at(&self) -> Option<NaiveDateTime> {
        let raw = self.date_of_measurement.trim();
        let normalized = raw.replacen(' ', "T", 1);
        NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
    }
}

/// Newest first; records with an unreadable date go last.
pub fn sort_newest_first(records: &mut [MeasurementRecord]) {
    records.sort_by(|a, b| b.measured_at().cmp(&a.measured_at()));
}
