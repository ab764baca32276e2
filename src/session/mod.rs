use std::time::Duration;
use serde::Serialize;
use uuid::Uuid;

use crate::models::measurement::MeasurementRequest;
use crate::models::sensor::SensorSample;
use crate::vitals::advice::AdviceItem;
use crate::vitals::aggregator::AggregatedResult;
use crate::vitals::VitalChannel;

pub mod machine;
pub mod runner;

pub use machine::MeasurementSession;
pub use runner::SessionRunner;

/// Period of both the poll timer and the duration counter.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000);
/// Seconds of accumulation after the first valid reading.
pub const REQUIRED_ACCUMULATION_SECS: u32 = 10;
/// No-finger readings a session accepts while waiting for a first valid one.
/// Failed polls do not count.
pub const MAX_INVALID_WHILE_AWAITING: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Idle,
    AwaitingValidReading,
    Accumulating,
    Complete,
    Failed,
}

impl SessionState {
    /// Polling is live and samples are being recorded.
    pub fn is_collecting(&self) -> bool {
        matches!(self, SessionState::AwaitingValidReading | SessionState::Accumulating)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Complete | SessionState::Failed)
    }
}

/// User-visible signals. Each failure class maps to exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionNotice {
    PlaceFinger,
    ProfileIncomplete,
    NoValidVitals,
    SaveFailed,
}

impl SessionNotice {
    pub fn message(&self) -> &'static str {
        match self {
            SessionNotice::PlaceFinger => "⚠️ Please place your finger on the sensor.",
            SessionNotice::ProfileIncomplete => "⚠️ Please complete your profile before starting a measurement.",
            SessionNotice::NoValidVitals => "⚠️ No valid vitals captured. Please try again.",
            SessionNotice::SaveFailed => "⚠️ Could not save measurements to the server.",
        }
    }
}

/// Everything a completed session produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub results: Vec<AggregatedResult>,
    pub advice: Vec<AdviceItem>,
    pub valid_samples: usize,
    pub total_samples: usize,
}

impl SessionSummary {
    pub fn result(&self, channel: VitalChannel) -> Option<&AggregatedResult> {
        self.results.iter().find(|result| result.channel == channel)
    }

    pub fn value(&self, channel: VitalChannel) -> Option<f64> {
        self.result(channel).map(|result| result.value)
    }

    /// Payload for the submission sink; values are already rounded per channel.
    pub fn measurement_request(&self, user_email: &str) -> MeasurementRequest {
        let value = |channel| self.value(channel).unwrap_or(0.0);
        MeasurementRequest {
            user_email: user_email.to_string(),
            heart_rate: value(VitalChannel::HeartRate) as i32,
            oxygen: value(VitalChannel::Oxygen) as i32,
            temperature: value(VitalChannel::BodyTemperature),
            humidity: value(VitalChannel::Humidity),
            room_temperature: value(VitalChannel::RoomTemperature),
        }
    }
}

/// Published to subscribers (the view layer) as the session progresses.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Started { session_id: Uuid },
    StateChanged(SessionState),
    Notice(SessionNotice),
    /// Most recently resolved reading.
    Reading(SensorSample),
    Elapsed(u32),
    FetchFailed(String),
    Completed(SessionSummary),
    Submitted,
}
