use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::broadcast::Receiver;

use health_monitor::models::error::MonitorError;
use health_monitor::models::measurement::MeasurementRequest;
use health_monitor::models::sensor::SensorSample;
use health_monitor::services::{BoxFuture, MeasurementSink, SensorSource};
use health_monitor::session::SessionEvent;

/// The reading from the happy-path scenario: every channel in its good range.
pub fn healthy_reading() -> SensorSample {
    SensorSample {
        heart_rate: 72.0,
        oxygen_saturation: 98.0,
        body_temperature: 36.8,
        room_temperature: 22.0,
        humidity: 45.0,
    }
}

pub fn no_finger() -> SensorSample {
    SensorSample {
        heart_rate: 0.0,
        ..healthy_reading()
    }
}

pub fn reading_with_heart_rate(heart_rate: f64) -> SensorSample {
    SensorSample {
        heart_rate,
        ..healthy_reading()
    }
}

#[derive(Debug, Clone)]
pub enum Step {
    Reading(SensorSample),
    Fail,
    /// Resolves only after the given delay.
    Delayed(Duration, SensorSample),
}

/// Plays back a fixed script, one step per fetch; the last step repeats forever.
pub struct ScriptedSource {
    steps: Vec<Step>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(steps: Vec<Step>) -> Self {
        assert!(!steps.is_empty(), "a script needs at least one step");
        Self {
            steps,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn repeating(sample: SensorSample) -> Self {
        Self::new(vec![Step::Reading(sample)])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SensorSource for ScriptedSource {
    fn fetch_sample(&self) -> BoxFuture<'_, Result<SensorSample, MonitorError>> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.steps[index.min(self.steps.len() - 1)].clone();
        Box::pin(async move {
            match step {
                Step::Reading(sample) => Ok(sample),
                Step::Fail => Err(MonitorError::SourceUnavailable("sensor offline".to_string())),
                Step::Delayed(delay, sample) => {
                    tokio::time::sleep(delay).await;
                    Ok(sample)
                }
            }
        })
    }
}

/// Records every submission; optionally rejects them all.
pub struct RecordingSink {
    submissions: Mutex<Vec<MeasurementRequest>>,
    fail: bool,
}

impl RecordingSink {
    pub fn accepting() -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn submitted(&self) -> Vec<MeasurementRequest> {
        self.submissions.lock().unwrap().clone()
    }
}

impl MeasurementSink for RecordingSink {
    fn submit(&self, measurement: MeasurementRequest) -> BoxFuture<'_, Result<(), MonitorError>> {
        self.submissions.lock().unwrap().push(measurement);
        let fail = self.fail;
        Box::pin(async move {
            if fail {
                return Err(MonitorError::UnexpectedStatus {
                    status: 500,
                    body: "database unavailable".to_string(),
                });
            }
            Ok(())
        })
    }
}

/// Everything published so far, without waiting.
pub fn drain_events(receiver: &mut Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}
