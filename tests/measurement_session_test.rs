use std::sync::Arc;
use std::time::Duration;

use health_monitor::models::error::MonitorError;
use health_monitor::models::user::{Gender, UserIdentity, UserProfile};
use health_monitor::session::{SessionEvent, SessionNotice, SessionRunner, SessionState};
use health_monitor::vitals::classifier::Severity;
use health_monitor::vitals::VitalChannel;

mod common;
use common::session_helpers::{drain_events, healthy_reading, no_finger, RecordingSink, ScriptedSource, Step};
use common::utils::{init_tracing, test_user};

#[tokio::test(start_paused = true)]
async fn healthy_session_completes_and_submits_averages() {
    init_tracing();
    let source = Arc::new(ScriptedSource::new(vec![
        Step::Reading(no_finger()),
        Step::Reading(healthy_reading()),
    ]));
    let sink = Arc::new(RecordingSink::accepting());
    let runner = SessionRunner::new(test_user(), source.clone(), sink.clone());
    let mut events = runner.subscribe();

    runner.start().await.expect("Failed to start session");
    tokio::time::sleep(Duration::from_secs(15)).await;

    assert_eq!(runner.state().await, SessionState::Complete);
    let summary = runner.summary().await.expect("No summary after completion");
    assert_eq!(summary.results.len(), 5);
    assert_eq!(summary.value(VitalChannel::HeartRate), Some(72.0));
    assert_eq!(summary.value(VitalChannel::BodyTemperature), Some(36.8));
    assert_eq!(summary.value(VitalChannel::RoomTemperature), Some(22.0));
    assert!(summary.results.iter().all(|result| result.severity == Severity::Good));
    assert_eq!(summary.advice.len(), 1);
    assert!(summary.advice[0].is_all_good());
    assert_eq!(summary.valid_samples, summary.total_samples - 1);

    let submitted = sink.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].user_email, "jane@example.com");
    assert_eq!(submitted[0].heart_rate, 72);
    assert_eq!(submitted[0].oxygen, 98);
    assert_eq!(submitted[0].temperature, 36.8);
    assert_eq!(submitted[0].room_temperature, 22.0);
    assert_eq!(submitted[0].humidity, 45.0);

    let events = drain_events(&mut events);
    assert!(events.contains(&SessionEvent::Notice(SessionNotice::PlaceFinger)));
    assert!(events.contains(&SessionEvent::StateChanged(SessionState::Accumulating)));
    let elapsed: Vec<u32> = events
        .iter()
        .filter_map(|event| match event {
            SessionEvent::Elapsed(secs) => Some(*secs),
            _ => None,
        })
        .collect();
    assert_eq!(elapsed, (1..=10).collect::<Vec<u32>>());

    let completed = events.iter().position(|e| matches!(e, SessionEvent::Completed(_))).unwrap();
    let submitted = events.iter().position(|e| *e == SessionEvent::Submitted).unwrap();
    assert!(completed < submitted);
    assert_eq!(runner.notice().await, None);
}

#[tokio::test(start_paused = true)]
async fn polling_stops_once_session_is_complete() {
    init_tracing();
    let source = Arc::new(ScriptedSource::repeating(healthy_reading()));
    let sink = Arc::new(RecordingSink::accepting());
    let runner = SessionRunner::new(test_user(), source.clone(), sink.clone());

    runner.start().await.unwrap();
    tokio::time::sleep(Duration::from_secs(12)).await;
    assert_eq!(runner.state().await, SessionState::Complete);

    let calls = source.calls();
    let samples = runner.samples().await.len();
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(source.calls(), calls);
    assert_eq!(runner.samples().await.len(), samples);
    assert_eq!(runner.elapsed_secs().await, 10);
    assert_eq!(sink.submitted().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn session_without_a_finger_fails_without_submitting() {
    init_tracing();
    let source = Arc::new(ScriptedSource::repeating(no_finger()));
    let sink = Arc::new(RecordingSink::accepting());
    let runner = SessionRunner::new(test_user(), source, sink.clone());
    let mut events = runner.subscribe();

    runner.start().await.unwrap();
    tokio::time::sleep(Duration::from_secs(15)).await;

    assert_eq!(runner.state().await, SessionState::Failed);
    assert_eq!(runner.notice().await, Some(SessionNotice::NoValidVitals));
    assert_eq!(runner.elapsed_secs().await, 0);
    assert!(runner.samples().await.len() >= 10);
    assert!(runner.summary().await.is_none());
    assert!(sink.submitted().is_empty());

    let events = drain_events(&mut events);
    assert!(events.contains(&SessionEvent::StateChanged(SessionState::Failed)));
    assert!(!events.iter().any(|e| matches!(e, SessionEvent::Completed(_))));
}

#[tokio::test(start_paused = true)]
async fn failed_submission_keeps_summary_and_reports_save_failure() {
    init_tracing();
    let source = Arc::new(ScriptedSource::repeating(healthy_reading()));
    let sink = Arc::new(RecordingSink::failing());
    let runner = SessionRunner::new(test_user(), source, sink.clone());
    let mut events = runner.subscribe();

    runner.start().await.unwrap();
    tokio::time::sleep(Duration::from_secs(15)).await;

    assert_eq!(runner.state().await, SessionState::Complete);
    assert!(runner.summary().await.is_some());
    assert_eq!(runner.notice().await, Some(SessionNotice::SaveFailed));
    assert_eq!(sink.submitted().len(), 1);

    let events = drain_events(&mut events);
    assert!(events.contains(&SessionEvent::Notice(SessionNotice::SaveFailed)));
    assert!(!events.contains(&SessionEvent::Submitted));
    assert!(!events.contains(&SessionEvent::Notice(SessionNotice::NoValidVitals)));
}

#[tokio::test(start_paused = true)]
async fn incomplete_profile_blocks_start() {
    init_tracing();
    let user = UserIdentity::new(
        "jane@example.com",
        UserProfile {
            weight: None,
            ..UserProfile::complete(34, Gender::Female, 168.0, 61.5)
        }
    );
    let source = Arc::new(ScriptedSource::repeating(healthy_reading()));
    let sink = Arc::new(RecordingSink::accepting());
    let runner = SessionRunner::new(user, source.clone(), sink.clone());
    let mut events = runner.subscribe();

    match runner.start().await {
        Err(MonitorError::IncompleteProfile(missing)) => assert_eq!(missing, vec!["weight"]),
        other => panic!("Expected an incomplete profile error, got {:?}", other),
    }
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(runner.state().await, SessionState::Idle);
    assert_eq!(runner.notice().await, Some(SessionNotice::ProfileIncomplete));
    assert_eq!(source.calls(), 0);
    assert_eq!(
        drain_events(&mut events),
        vec![SessionEvent::Notice(SessionNotice::ProfileIncomplete)]
    );
}

#[tokio::test(start_paused = true)]
async fn transient_fetch_failures_do_not_end_the_session() {
    init_tracing();
    let source = Arc::new(ScriptedSource::new(vec![
        Step::Reading(healthy_reading()),
        Step::Fail,
        Step::Fail,
        Step::Reading(healthy_reading()),
    ]));
    let sink = Arc::new(RecordingSink::accepting());
    let runner = SessionRunner::new(test_user(), source, sink.clone());
    let mut events = runner.subscribe();

    runner.start().await.unwrap();
    tokio::time::sleep(Duration::from_secs(15)).await;

    assert_eq!(runner.state().await, SessionState::Complete);
    let events = drain_events(&mut events);
    let failures = events
        .iter()
        .filter(|event| matches!(event, SessionEvent::FetchFailed(_)))
        .count();
    assert_eq!(failures, 2);
    assert_eq!(sink.submitted().len(), 1);
    assert_eq!(sink.submitted()[0].heart_rate, 72);
}

#[tokio::test(start_paused = true)]
async fn sensor_outage_keeps_the_session_waiting() {
    init_tracing();
    let source = Arc::new(ScriptedSource::new(vec![Step::Fail]));
    let sink = Arc::new(RecordingSink::accepting());
    let runner = SessionRunner::new(test_user(), source.clone(), sink.clone());
    let mut events = runner.subscribe();

    runner.start().await.unwrap();
    tokio::time::sleep(Duration::from_secs(30)).await;

    assert_eq!(runner.state().await, SessionState::AwaitingValidReading);
    assert_ne!(runner.notice().await, Some(SessionNotice::NoValidVitals));
    assert!(runner.samples().await.is_empty());
    assert!(sink.submitted().is_empty());
    assert!(source.calls() >= 29);

    let events = drain_events(&mut events);
    let failures = events
        .iter()
        .filter(|event| matches!(event, SessionEvent::FetchFailed(_)))
        .count();
    assert!(failures >= 25);
    assert!(!events.contains(&SessionEvent::StateChanged(SessionState::Failed)));
    runner.stop().await;
}

#[tokio::test(start_paused = true)]
async fn only_no_finger_readings_count_towards_failure() {
    init_tracing();
    // Twelve seconds of outage, then the sensor answers with no finger on it.
    let mut steps = vec![Step::Fail; 12];
    steps.push(Step::Reading(no_finger()));
    let source = Arc::new(ScriptedSource::new(steps));
    let sink = Arc::new(RecordingSink::accepting());
    let runner = SessionRunner::new(test_user(), source, sink.clone());

    runner.start().await.unwrap();
    tokio::time::sleep(Duration::from_millis(15500)).await;
    assert_eq!(runner.state().await, SessionState::AwaitingValidReading);
    assert_eq!(runner.notice().await, Some(SessionNotice::PlaceFinger));
    assert_eq!(runner.samples().await.len(), 3);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(runner.state().await, SessionState::Failed);
    assert_eq!(runner.notice().await, Some(SessionNotice::NoValidVitals));
    assert!(runner.samples().await.iter().all(|sample| !sample.is_valid()));
    assert!(sink.submitted().is_empty());
}

#[tokio::test(start_paused = true)]
async fn session_recovers_when_sensor_comes_back() {
    init_tracing();
    let mut steps = vec![Step::Fail; 15];
    steps.push(Step::Reading(healthy_reading()));
    let source = Arc::new(ScriptedSource::new(steps));
    let sink = Arc::new(RecordingSink::accepting());
    let runner = SessionRunner::new(test_user(), source, sink.clone());

    runner.start().await.unwrap();
    tokio::time::sleep(Duration::from_secs(30)).await;

    assert_eq!(runner.state().await, SessionState::Complete);
    assert_eq!(sink.submitted().len(), 1);
    assert_eq!(sink.submitted()[0].heart_rate, 72);
}
