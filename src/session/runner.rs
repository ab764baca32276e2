use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::models::error::MonitorError;
use crate::models::sensor::SensorSample;
use crate::models::user::UserIdentity;
use crate::services::{MeasurementSink, SensorSource};
use crate::session::{
    MeasurementSession, SessionEvent, SessionNotice, SessionState, SessionSummary, POLL_INTERVAL,
};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Periodic tasks belonging to one session epoch.
#[derive(Default)]
struct Tasks {
    epoch: u64,
    poll: Option<JoinHandle<()>>,
    counter: Option<JoinHandle<()>>,
}

impl Tasks {
    fn abort_all(&mut self) {
        if let Some(handle) = self.poll.take() {
            handle.abort();
        }
        if let Some(handle) = self.counter.take() {
            handle.abort();
        }
    }
}

struct Shared {
    session: Mutex<MeasurementSession>,
    source: Arc<dyn SensorSource>,
    sink: Arc<dyn MeasurementSink>,
    events: broadcast::Sender<SessionEvent>,
    /// Bumped on every start, stop and reset. Work tagged with an older epoch is dropped.
    epoch: AtomicU64,
    tasks: Mutex<Tasks>,
}

impl Shared {
    fn is_current(&self, epoch: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == epoch
    }

    fn publish(&self, events: Vec<SessionEvent>) {
        for event in events {
            // No subscribers is fine.
            let _ = self.events.send(event);
        }
    }

    async fn apply_fetch(&self, epoch: u64, outcome: Result<SensorSample, MonitorError>) {
        let events = {
            let mut session = self.session.lock().await;
            if !self.is_current(epoch) {
                tracing::debug!("Discarding sensor result from stale session epoch {}", epoch);
                return;
            }
            match outcome {
                Ok(sample) => session.record_sample(sample),
                Err(e) => session.record_fetch_failure(&e.to_string()),
            }
        };
        self.publish(events);
    }

    async fn stop_polling(&self, epoch: u64) {
        let mut tasks = self.tasks.lock().await;
        if tasks.epoch == epoch {
            if let Some(handle) = tasks.poll.take() {
                handle.abort();
            }
        }
    }

    async fn submit(&self, epoch: u64, summary: SessionSummary, user_email: String) {
        let request = summary.measurement_request(&user_email);
        let outcome = self.sink.submit(request).await;

        let events = {
            let mut session = self.session.lock().await;
            if !self.is_current(epoch) {
                return;
            }
            match outcome {
                Ok(()) => vec![SessionEvent::Submitted],
                Err(e) => {
                    tracing::error!("❌ Failed to save measurements for {}: {}", user_email, e);
                    session.mark_submission_failed()
                }
            }
        };
        self.publish(events);
    }
}

async fn poll_loop(shared: Arc<Shared>, epoch: u64) {
    let mut interval = interval_at(Instant::now() + POLL_INTERVAL, POLL_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        if !shared.is_current(epoch) {
            break;
        }
        // Fetches are not serialized; each applies in whatever order it resolves.
        let shared = shared.clone();
        tokio::spawn(async move {
            let outcome = shared.source.fetch_sample().await;
            shared.apply_fetch(epoch, outcome).await;
        });
    }
}

async fn counter_loop(shared: Arc<Shared>, epoch: u64) {
    let mut interval = interval_at(Instant::now() + POLL_INTERVAL, POLL_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let (events, state, completed) = {
            let mut session = shared.session.lock().await;
            if !shared.is_current(epoch) {
                break;
            }
            let events = session.tick();
            let completed = session
                .summary()
                .cloned()
                .map(|summary| (summary, session.user().email.clone()));
            (events, session.state(), completed)
        };
        shared.publish(events);

        if state.is_terminal() {
            shared.stop_polling(epoch).await;
            if let (SessionState::Complete, Some((summary, email))) = (state, completed) {
                shared.submit(epoch, summary, email).await;
            }
            break;
        }
    }
}

/// Drives a [`MeasurementSession`] with a poll timer and a duration counter.
pub struct SessionRunner {
    shared: Arc<Shared>,
}

impl SessionRunner {
    pub fn new(
        user: UserIdentity,
        source: Arc<dyn SensorSource>,
        sink: Arc<dyn MeasurementSink>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                session: Mutex::new(MeasurementSession::new(user)),
                source,
                sink,
                events,
                epoch: AtomicU64::new(0),
                tasks: Mutex::new(Tasks::default()),
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.shared.events.subscribe()
    }

    /// Starts a new measurement, cancelling any session already running.
    #[tracing::instrument(name = "Start measurement session", skip(self))]
    pub async fn start(&self) -> Result<(), MonitorError> {
        let mut tasks = self.shared.tasks.lock().await;
        tasks.abort_all();

        let epoch = {
            let mut session = self.shared.session.lock().await;
            let epoch = self.shared.epoch.fetch_add(1, Ordering::SeqCst) + 1;
            match session.start() {
                Ok(events) => {
                    self.shared.publish(events);
                    epoch
                }
                Err(e) => {
                    self.shared.publish(vec![SessionEvent::Notice(SessionNotice::ProfileIncomplete)]);
                    tasks.epoch = epoch;
                    return Err(e);
                }
            }
        };

        tasks.epoch = epoch;
        tasks.poll = Some(tokio::spawn(poll_loop(self.shared.clone(), epoch)));
        tasks.counter = Some(tokio::spawn(counter_loop(self.shared.clone(), epoch)));
        Ok(())
    }

    /// Cancels both timers and discards the session's samples.
    pub async fn stop(&self) {
        let mut tasks = self.shared.tasks.lock().await;
        tasks.abort_all();

        let events = {
            let mut session = self.shared.session.lock().await;
            let epoch = self.shared.epoch.fetch_add(1, Ordering::SeqCst) + 1;
            tasks.epoch = epoch;
            session.reset()
        };
        tracing::info!("⏹️ Measurement session stopped");
        self.shared.publish(events);
    }

    pub async fn reset(&self) {
        self.stop().await;
    }

    pub async fn state(&self) -> SessionState {
        self.shared.session.lock().await.state()
    }

    pub async fn summary(&self) -> Option<SessionSummary> {
        self.shared.session.lock().await.summary().cloned()
    }

    pub async fn notice(&self) -> Option<SessionNotice> {
        self.shared.session.lock().await.notice()
    }

    pub async fn elapsed_secs(&self) -> u32 {
        self.shared.session.lock().await.elapsed_secs()
    }

    pub async fn samples(&self) -> Vec<SensorSample> {
        self.shared.session.lock().await.samples().to_vec()
    }

    pub async fn current_reading(&self) -> Option<SensorSample> {
        self.shared.session.lock().await.current_reading()
    }
}

impl Drop for SessionRunner {
    fn drop(&mut self) {
        self.shared.epoch.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut tasks) = self.shared.tasks.try_lock() {
            tasks.abort_all();
        }
    }
}
