use serde::{Deserialize, Serialize};

/// Thresholds used by the skill-match and utilization scorers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    pub standard_hours_per_day: f64,
    pub low_efficiency_threshold: f64,
    pub process_review_threshold: f64,
    pub adequate_match_threshold: f64,
    pub high_priority_below: f64,
    pub medium_priority_below: f64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            standard_hours_per_day: 8.0,
            low_efficiency_threshold: 85.0,
            process_review_threshold: 70.0,
            adequate_match_threshold: 75.0,
            high_priority_below: 50.0,
            medium_priority_below: 75.0,
        }
    }
}
