//! Skill-match and labor-hour utilization scoring over position groups.
//!
//! Both scorers are pure: the same groups always produce the same report, and
//! every zero denominator yields 0 instead of NaN.

mod config;
mod skill_match;
mod utilization;
pub mod views;

pub use config::PerformanceConfig;
pub use views::{
    Difficulty, EfficiencyCause, LowEfficiencyPosition, MatchStatus, OptimizationKind,
    OptimizationSuggestion, PerformanceReport, PositionMatch, SkillMatchReport, Trainee,
    TrainingDuration, TrainingPlan, TrainingPriority, UtilizationReport, WorkerSkillGap,
};

use super::domain::PositionGroup;

#[derive(Debug, Clone, Default)]
pub struct PerformanceScorer {
    config: PerformanceConfig,
}

impl PerformanceScorer {
    pub fn new(config: PerformanceConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, groups: &[PositionGroup]) -> PerformanceReport {
        PerformanceReport {
            skill_match: self.skill_match(groups),
            hour_utilization: self.hour_utilization(groups),
        }
    }

    pub fn skill_match(&self, groups: &[PositionGroup]) -> SkillMatchReport {
        skill_match::score_skill_match(groups, &self.config)
    }

    pub fn hour_utilization(&self, groups: &[PositionGroup]) -> UtilizationReport {
        utilization::score_utilization(groups, &self.config)
    }
}

pub(crate) fn percentage(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}
