use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct SensorSettings {
    pub base_url: String,
    /// Kept below the poll interval so a hung request never spans two ticks.
    pub request_timeout_ms: u64,
}

impl SensorSettings {
    pub fn new(base_url: String, request_timeout_ms: u64) -> Self {
        Self {
            base_url,
            request_timeout_ms,
        }
    }
}
