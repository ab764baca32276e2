use serde::Serialize;

use crate::vitals::aggregator::AggregatedResult;
use crate::vitals::classifier::Severity;

/// Presentation limit; every result stays available on the summary.
pub const MAX_ADVICE_ITEMS: usize = 6;
pub const ALL_GOOD_KEY: &str = "allGood";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdviceItem {
    pub key: String,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub icon: &'static str,
}

impl AdviceItem {
    pub fn all_good() -> Self {
        Self {
            key: ALL_GOOD_KEY.to_string(),
            title: "All vitals normal".to_string(),
            message: "All vitals are in healthy range.".to_string(),
            severity: Severity::Good,
            icon: "check-circle",
        }
    }

    fn from_result(result: &AggregatedResult) -> Self {
        Self {
            key: result.channel.key().to_string(),
            title: format!(
                "{} is {} ({})",
                result.channel.label(),
                result.band.describe(),
                result.channel.format_value(result.value)
            ),
            message: result.message.to_string(),
            severity: result.severity,
            icon: result.channel.icon(),
        }
    }

    pub fn is_all_good(&self) -> bool {
        self.key == ALL_GOOD_KEY
    }
}

/// Non-good channels, most severe first, ties in channel declaration order.
/// A single all-good item is returned when every channel is good.
pub fn rank_advice(results: &[AggregatedResult]) -> Vec<AdviceItem> {
    if results.is_empty() {
        return Vec::new();
    }

    let mut flagged: Vec<&AggregatedResult> = results
        .iter()
        .filter(|result| result.severity != Severity::Good)
        .collect();

    if flagged.is_empty() {
        return vec![AdviceItem::all_good()];
    }

    flagged.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.channel.cmp(&b.channel))
    });

    flagged
        .into_iter()
        .take(MAX_ADVICE_ITEMS)
        .map(AdviceItem::from_result)
        .collect()
}
