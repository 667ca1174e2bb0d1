use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// A worker eligible to cover a shortage elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReassignableWorker {
    pub worker_id: String,
    pub name: String,
    pub supported_positions: Vec<String>,
    pub skill_by_position: BTreeMap<String, u32>,
}

impl ReassignableWorker {
    pub fn supports(&self, position_code: &str) -> bool {
        self.supported_positions
            .iter()
            .any(|code| code == position_code)
    }

    pub fn skill_at(&self, position_code: &str) -> u32 {
        self.skill_by_position
            .get(position_code)
            .copied()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamWorkload {
    pub team: String,
    pub total_workers: usize,
    pub on_duty_workers: usize,
    pub on_leave_workers: usize,
    /// Assigned workers per skill level.
    pub skill_distribution: BTreeMap<u32, usize>,
    pub utilization_rate: f64,
    pub reassignable_pool: Vec<ReassignableWorker>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentType {
    InternalTeam,
    CrossTeam,
    Overtime,
}

impl AdjustmentType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InternalTeam => "Internal Team Adjustment",
            Self::CrossTeam => "Cross-Team Adjustment",
            Self::Overtime => "Overtime Compensation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjustedWorker {
    pub worker_id: String,
    pub name: String,
    pub current_team: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_team: Option<String>,
    pub skill_level: u32,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EfficiencyImpact {
    pub origin_loss: f64,
    pub target_change: f64,
    pub overall_impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleTimeImpact {
    pub delay_hours: f64,
    pub critical_path: bool,
    pub affected_products: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentSuggestion {
    pub adjustment_type: AdjustmentType,
    pub adjustment_label: &'static str,
    pub origin_position: String,
    pub affected_workers: Vec<AdjustedWorker>,
    pub efficiency_impact: EfficiencyImpact,
    pub cycle_time_impact: CycleTimeImpact,
    pub implementation_note: String,
    /// 1-10, higher is preferred.
    pub priority: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AffectedPosition {
    pub position_code: String,
    pub required_headcount: u32,
    pub assigned_headcount: u32,
    pub on_leave: u32,
    pub shortage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentPlan {
    pub date: NaiveDate,
    pub team_workloads: Vec<TeamWorkload>,
    pub affected_positions: Vec<AffectedPosition>,
    pub suggestions: Vec<AdjustmentSuggestion>,
}

impl AdjustmentPlan {
    /// Positions short of staff that no strategy could cover.
    pub fn unremedied_positions(&self) -> Vec<&str> {
        self.affected_positions
            .iter()
            .filter(|position| position.shortage > 0)
            .filter(|position| {
                !self
                    .suggestions
                    .iter()
                    .any(|suggestion| suggestion.origin_position == position.position_code)
            })
            .map(|position| position.position_code.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionImpact {
    pub position_code: String,
    pub assigned_headcount: u32,
    pub required_headcount: u32,
    pub remaining_capacity: f64,
    pub efficiency_loss: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaveImpactAnalysis {
    pub worker_id: String,
    pub positions: Vec<PositionImpact>,
    pub suggested_actions: Vec<String>,
}
