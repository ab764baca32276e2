use serde::Deserialize;
use secrecy::SecretString;

#[derive(Deserialize, Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub api_token: Option<SecretString>,
}

impl BackendSettings {
    pub fn new(base_url: String, request_timeout_ms: u64, api_token: Option<SecretString>) -> Self {
        Self {
            base_url,
            request_timeout_ms,
            api_token,
        }
    }
}
