use uuid::Uuid;

use crate::models::error::MonitorError;
use crate::models::sensor::SensorSample;
use crate::models::user::UserIdentity;
use crate::session::{
    SessionEvent, SessionNotice, SessionState, SessionSummary, MAX_INVALID_WHILE_AWAITING,
    REQUIRED_ACCUMULATION_SECS,
};
use crate::vitals::advice::rank_advice;
use crate::vitals::aggregator::aggregate;

/// State of one measurement attempt. Has no timers of its own:
/// the runner feeds it samples and counter ticks, it returns the resulting events.
#[derive(Debug)]
pub struct MeasurementSession {
    id: Uuid,
    user: UserIdentity,
    state: SessionState,
    samples: Vec<SensorSample>,
    current: Option<SensorSample>,
    elapsed_secs: u32,
    invalid_while_awaiting: u32,
    notice: Option<SessionNotice>,
    summary: Option<SessionSummary>,
}

impl MeasurementSession {
    pub fn new(user: UserIdentity) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            state: SessionState::Idle,
            samples: Vec::new(),
            current: None,
            elapsed_secs: 0,
            invalid_while_awaiting: 0,
            notice: None,
            summary: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user(&self) -> &UserIdentity {
        &self.user
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Every recorded sample, valid or not, in resolution order.
    pub fn samples(&self) -> &[SensorSample] {
        &self.samples
    }

    pub fn current_reading(&self) -> Option<SensorSample> {
        self.current
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn notice(&self) -> Option<SessionNotice> {
        self.notice
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// Starts a fresh attempt, discarding anything from a previous one.
    /// Stays `Idle` when the user's profile is incomplete.
    pub fn start(&mut self) -> Result<Vec<SessionEvent>, MonitorError> {
        self.clear();

        let missing = self.user.missing_fields();
        if !missing.is_empty() {
            tracing::warn!("⚠️ Not starting measurement, profile incomplete: {:?}", missing);
            self.notice = Some(SessionNotice::ProfileIncomplete);
            return Err(MonitorError::IncompleteProfile(missing));
        }

        self.id = Uuid::new_v4();
        self.state = SessionState::AwaitingValidReading;
        tracing::info!("🫀 Measurement session {} started for {}", self.id, self.user.email);

        Ok(vec![
            SessionEvent::Started { session_id: self.id },
            SessionEvent::StateChanged(self.state),
        ])
    }

    pub fn record_sample(&mut self, sample: SensorSample) -> Vec<SessionEvent> {
        if !self.state.is_collecting() {
            return Vec::new();
        }

        self.samples.push(sample);
        self.current = Some(sample);
        let mut events = vec![SessionEvent::Reading(sample)];

        if self.state == SessionState::AwaitingValidReading {
            if sample.is_valid() {
                self.state = SessionState::Accumulating;
                self.notice = None;
                tracing::info!("💓 Valid reading detected, accumulating for {}s", REQUIRED_ACCUMULATION_SECS);
                events.push(SessionEvent::StateChanged(self.state));
            } else {
                self.invalid_while_awaiting += 1;
                self.notice = Some(SessionNotice::PlaceFinger);
                events.push(SessionEvent::Notice(SessionNotice::PlaceFinger));
            }
        }

        events
    }

    /// A failed poll: reported, otherwise ignored.
    pub fn record_fetch_failure(&mut self, reason: &str) -> Vec<SessionEvent> {
        if !self.state.is_collecting() {
            return Vec::new();
        }
        tracing::warn!("Sensor poll failed, retrying on next tick: {}", reason);
        vec![SessionEvent::FetchFailed(reason.to_string())]
    }

    /// One tick of the duration counter.
    pub fn tick(&mut self) -> Vec<SessionEvent> {
        match self.state {
            SessionState::Accumulating => {
                self.elapsed_secs += 1;
                let mut events = vec![SessionEvent::Elapsed(self.elapsed_secs)];
                if self.elapsed_secs >= REQUIRED_ACCUMULATION_SECS {
                    events.extend(self.evaluate());
                }
                events
            }
            SessionState::AwaitingValidReading
                if self.invalid_while_awaiting >= MAX_INVALID_WHILE_AWAITING =>
            {
                self.evaluate()
            }
            _ => Vec::new(),
        }
    }

    fn evaluate(&mut self) -> Vec<SessionEvent> {
        let valid_samples = self.samples.iter().filter(|sample| sample.is_valid()).count();

        if valid_samples == 0 {
            self.state = SessionState::Failed;
            self.notice = Some(SessionNotice::NoValidVitals);
            tracing::warn!("❌ Session {} captured no valid vitals", self.id);
            return vec![
                SessionEvent::StateChanged(self.state),
                SessionEvent::Notice(SessionNotice::NoValidVitals),
            ];
        }

        let results = aggregate(&self.samples);
        let advice = rank_advice(&results);
        let summary = SessionSummary {
            results,
            advice,
            valid_samples,
            total_samples: self.samples.len(),
        };

        self.state = SessionState::Complete;
        self.notice = None;
        self.summary = Some(summary.clone());
        tracing::info!(
            "✅ Session {} complete: {} valid of {} samples",
            self.id,
            valid_samples,
            self.samples.len()
        );

        vec![
            SessionEvent::StateChanged(self.state),
            SessionEvent::Completed(summary),
        ]
    }

    /// The summary stays available; only the notice changes.
    pub fn mark_submission_failed(&mut self) -> Vec<SessionEvent> {
        if self.state != SessionState::Complete {
            return Vec::new();
        }
        self.notice = Some(SessionNotice::SaveFailed);
        vec![SessionEvent::Notice(SessionNotice::SaveFailed)]
    }

    pub fn reset(&mut self) -> Vec<SessionEvent> {
        let was_idle = self.state == SessionState::Idle && self.samples.is_empty();
        self.clear();
        if was_idle {
            return Vec::new();
        }
        vec![SessionEvent::StateChanged(SessionState::Idle)]
    }

    fn clear(&mut self) {
        self.state = SessionState::Idle;
        self.samples.clear();
        self.current = None;
        self.elapsed_secs = 0;
        self.invalid_while_awaiting = 0;
        self.notice = None;
        self.summary = None;
    }
}
