use serde::Deserialize;

pub const DEFAULT_MIN_VALID_BPM: f64 = 60.0;

fn default_min_valid_bpm() -> f64 {
    DEFAULT_MIN_VALID_BPM
}

#[derive(Deserialize, Debug, Clone)]
pub struct RelaySettings {
    /// Readings below this heart rate are served as `bpm = 0`.
    #[serde(default = "default_min_valid_bpm")]
    pub min_valid_bpm: f64,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            min_valid_bpm: DEFAULT_MIN_VALID_BPM,
        }
    }
}
