use std::fmt;
use serde::Serialize;

use crate::models::sensor::SensorSample;
use crate::vitals::classifier::{evaluate, Band, Severity};
use crate::vitals::VitalChannel;

/// Session-final value of one channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedResult {
    pub channel: VitalChannel,
    pub value: f64,
    pub severity: Severity,
    pub band: Band,
    pub message: &'static str,
}

/// One summary row: label, value with its unit, severity.
impl fmt::Display for AggregatedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<18} {:>9} {}",
            self.channel.label(),
            self.channel.format_value(self.value),
            self.severity
        )
    }
}

/// Arithmetic mean of the channel over valid samples only.
/// Returns NaN when no valid sample exists.
pub fn mean(samples: &[SensorSample], channel: VitalChannel) -> f64 {
    let (sum, count) = samples
        .iter()
        .filter(|sample| sample.is_valid())
        .fold((0.0, 0usize), |(sum, count), sample| (sum + sample.value(channel), count + 1));

    if count == 0 {
        return f64::NAN;
    }
    sum / count as f64
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    if decimals == 0 {
        return value.round();
    }
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

pub fn rounded_mean(samples: &[SensorSample], channel: VitalChannel) -> f64 {
    round_to(mean(samples, channel), channel.decimals())
}

/// Builds one result per channel with a finite mean, in channel declaration order.
pub fn aggregate(samples: &[SensorSample]) -> Vec<AggregatedResult> {
    VitalChannel::ALL
        .iter()
        .filter_map(|&channel| {
            let value = rounded_mean(samples, channel);
            if !value.is_finite() {
                tracing::debug!("No valid data for {}, skipping", channel);
                return None;
            }
            let classification = evaluate(channel, value);
            Some(AggregatedResult {
                channel,
                value,
                severity: classification.severity,
                band: classification.band,
                message: classification.message,
            })
        })
        .collect()
}
