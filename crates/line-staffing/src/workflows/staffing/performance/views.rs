use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    FullyMatched,
    AdequatelyMatched,
    NeedsTraining,
}

impl MatchStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullyMatched => "Fully Matched",
            Self::AdequatelyMatched => "Adequately Matched",
            Self::NeedsTraining => "Needs Training",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPriority {
    High,
    Medium,
    Low,
}

impl TrainingPriority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingDuration {
    TwoToFourWeeks,
    OneToThreeMonths,
    ThreeToSixMonths,
}

impl TrainingDuration {
    pub const fn for_gap(gap: u32) -> Self {
        if gap > 2 {
            Self::ThreeToSixMonths
        } else if gap > 1 {
            Self::OneToThreeMonths
        } else {
            Self::TwoToFourWeeks
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TwoToFourWeeks => "2-4 weeks",
            Self::OneToThreeMonths => "1-3 months",
            Self::ThreeToSixMonths => "3-6 months",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerSkillGap {
    pub worker_id: String,
    pub name: String,
    pub actual_skill: u32,
    pub skill_gap: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionMatch {
    pub position_code: String,
    pub work_center: String,
    pub required_level: u32,
    pub average_skill: f64,
    pub meeting_count: usize,
    pub assigned_count: usize,
    pub match_rate: f64,
    pub status: MatchStatus,
    pub status_label: &'static str,
    pub workers: Vec<WorkerSkillGap>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trainee {
    pub worker_id: String,
    pub name: String,
    pub current_skill: u32,
    pub target_skill: u32,
    pub content: String,
    pub duration: TrainingDuration,
    pub duration_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingPlan {
    pub position_code: String,
    pub work_center: String,
    pub trainees: Vec<Trainee>,
    pub priority: TrainingPriority,
    pub priority_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillMatchReport {
    pub overall_match_rate: f64,
    pub positions: Vec<PositionMatch>,
    pub training_plans: Vec<TrainingPlan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyCause {
    Understaffed,
    SkillShortfall,
    Other,
}

impl EfficiencyCause {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Understaffed => "Understaffed",
            Self::SkillShortfall => "Skill shortfall",
            Self::Other => "Other factors",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowEfficiencyPosition {
    pub position_code: String,
    pub work_center: String,
    pub utilization: f64,
    pub standard_hours: f64,
    pub actual_hours: f64,
    pub gap_hours: f64,
    pub causes: Vec<EfficiencyCause>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationKind {
    StaffingIncrease,
    Training,
    ProcessReview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

impl Difficulty {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Moderate => "Moderate",
            Self::Hard => "Hard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationSuggestion {
    pub position_code: String,
    pub kind: OptimizationKind,
    pub recommendation: String,
    pub expected_effect: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilizationReport {
    pub overall_utilization: f64,
    pub low_efficiency: Vec<LowEfficiencyPosition>,
    pub suggestions: Vec<OptimizationSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceReport {
    pub skill_match: SkillMatchReport,
    pub hour_utilization: UtilizationReport,
}
