use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use health_monitor::config::settings::get_config;
use health_monitor::models::user::UserIdentity;
use health_monitor::services::{MeasurementClient, SensorClient};
use health_monitor::session::{SessionEvent, SessionNotice, SessionRunner, SessionSummary};
use health_monitor::telemetry::{get_subscriber, init_subscriber};
use health_monitor::utils::parse_user::parse_user_from_args;
use health_monitor::vitals::personalization::{recipe_ingredients, workout_query};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = get_config()?;

    let subscriber = get_subscriber(
        "monitor-session".into(),
        config.application.log_level.clone(),
        std::io::stderr
    );
    init_subscriber(subscriber);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let user = parse_user_from_args(&args)?;

    let source = Arc::new(SensorClient::new(&config.sensor)?);
    let backend = Arc::new(MeasurementClient::new(&config.backend)?);
    let runner = SessionRunner::new(user.clone(), source, backend.clone());
    let mut events = runner.subscribe();

    if let Err(e) = runner.start().await {
        eprintln!("{}", SessionNotice::ProfileIncomplete.message());
        return Err(e.into());
    }
    println!("{}", SessionNotice::PlaceFinger.message());

    let mut saved = false;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                runner.stop().await;
                println!("Measurement cancelled.");
                return Ok(());
            }
            event = events.recv() => match event {
                Ok(SessionEvent::Elapsed(secs)) => println!("⏱️ {}s", secs),
                Ok(SessionEvent::Notice(SessionNotice::PlaceFinger)) => {}
                Ok(SessionEvent::Notice(notice)) => {
                    println!("{}", notice.message());
                    if matches!(notice, SessionNotice::SaveFailed | SessionNotice::NoValidVitals) {
                        break;
                    }
                }
                Ok(SessionEvent::Completed(summary)) => print_summary(&summary),
                Ok(SessionEvent::Submitted) => {
                    saved = true;
                    break;
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Skipped {} session events", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    }

    if saved {
        println!("✅ Measurements saved.");
        print_personalization(&backend, &user).await;
    }
    Ok(())
}

fn print_summary(summary: &SessionSummary) {
    println!();
    println!("Averages ({} valid of {} samples):", summary.valid_samples, summary.total_samples);
    for result in &summary.results {
        println!("  {}", result);
    }
    println!();
    println!("Advice:");
    for item in &summary.advice {
        println!("  [{}] {}", item.severity, item.title);
        println!("      {}", item.message);
    }
}

async fn print_personalization(backend: &MeasurementClient, user: &UserIdentity) {
    match backend.latest_measurement(&user.email).await {
        Ok(Some(latest)) => {
            let [first, second] = recipe_ingredients(&latest);
            let query = workout_query(&user.profile, &latest);
            println!("🥗 Suggested ingredients: {}, {}", first, second);
            println!(
                "🏃 Workout query: age={} gender={} heartRate={}",
                query.age, query.gender, query.heart_rate
            );
        }
        Ok(None) => tracing::info!("No stored measurements for {}", user.email),
        Err(e) => tracing::warn!("Could not load measurement history: {}", e),
    }
}
