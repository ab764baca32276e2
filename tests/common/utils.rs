use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use actix_web::{web, App, HttpResponse, HttpServer};
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::json;

use health_monitor::run;
use health_monitor::config::backend::BackendSettings;
use health_monitor::config::relay::RelaySettings;
use health_monitor::config::sensor::SensorSettings;
use health_monitor::models::measurement::{MeasurementRecord, MeasurementRequest};
use health_monitor::models::user::{Gender, UserIdentity, UserProfile};
use health_monitor::services::SensorRelay;
use health_monitor::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub fn init_tracing() {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);
}

pub struct TestApp {
    pub address: String,
}

impl TestApp {
    pub fn sensor_settings(&self) -> SensorSettings {
        SensorSettings::new(self.address.clone(), 900)
    }
}

/// Starts the sensor relay on a random port.
pub async fn spawn_app() -> TestApp {
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = run(listener, SensorRelay::new(&RelaySettings::default()))
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);
    TestApp { address }
}

/// Serves a fixed JSON body on `GET /data`, standing in for a sensor endpoint.
pub async fn spawn_fake_sensor(reading: serde_json::Value) -> TestApp {
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let reading = web::Data::new(reading);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(reading.clone())
            .route("/data", web::get().to(|reading: web::Data<serde_json::Value>| async move {
                HttpResponse::Ok().json(reading.get_ref())
            }))
    })
    .listen(listener)
    .expect("Failed to bind address")
    .run();
    let _ = tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
    }
}

struct FakeBackendState {
    submissions: Arc<Mutex<Vec<MeasurementRequest>>>,
    history: Vec<MeasurementRecord>,
    fail_submissions: bool,
}

pub struct FakeBackend {
    pub address: String,
    pub submissions: Arc<Mutex<Vec<MeasurementRequest>>>,
}

impl FakeBackend {
    pub fn settings(&self) -> BackendSettings {
        BackendSettings::new(self.address.clone(), 2000, None)
    }

    pub fn submitted(&self) -> Vec<MeasurementRequest> {
        self.submissions.lock().unwrap().clone()
    }
}

#[derive(Deserialize)]
struct HistoryQuery {
    email: String,
}

async fn fake_submit(
    body: web::Json<MeasurementRequest>,
    state: web::Data<FakeBackendState>
) -> HttpResponse {
    if state.fail_submissions {
        return HttpResponse::InternalServerError().json(json!({
            "status": "error",
            "message": "database unavailable"
        }));
    }
    state.submissions.lock().unwrap().push(body.into_inner());
    HttpResponse::Created().json(json!({ "status": "success" }))
}

async fn fake_history(
    query: web::Query<HistoryQuery>,
    state: web::Data<FakeBackendState>
) -> HttpResponse {
    if query.email.is_empty() {
        return HttpResponse::BadRequest().finish();
    }
    HttpResponse::Ok().json(&state.history)
}

/// In-process stand-in for the measurement API.
pub async fn spawn_fake_backend(history: Vec<MeasurementRecord>, fail_submissions: bool) -> FakeBackend {
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let submissions = Arc::new(Mutex::new(Vec::new()));
    let state = web::Data::new(FakeBackendState {
        submissions: submissions.clone(),
        history,
        fail_submissions,
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/measurements/", web::post().to(fake_submit))
            .route("/measurements/all-by-user", web::get().to(fake_history))
    })
    .listen(listener)
    .expect("Failed to bind address")
    .run();
    let _ = tokio::spawn(server);

    FakeBackend {
        address: format!("http://127.0.0.1:{}", port),
        submissions,
    }
}

pub fn test_user() -> UserIdentity {
    UserIdentity::new(
        "jane@example.com",
        UserProfile::complete(34, Gender::Female, 168.0, 61.5)
    )
}

pub fn record(date: &str, heart_rate: i32, oxygen: i32, temperature: f64) -> MeasurementRecord {
    MeasurementRecord {
        id: None,
        temperature,
        heart_rate,
        oxygen,
        humidity: 45.0,
        room_temperature: 22.0,
        date_of_measurement: date.to_string(),
    }
}
