use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum MonitorError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unexpected response {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Sensor source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Profile incomplete, missing: {}", .0.join(", "))]
    IncompleteProfile(Vec<&'static str>),
}
