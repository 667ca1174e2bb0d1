use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Required level assumed when a group label carries no parseable level.
pub const DEFAULT_REQUIRED_LEVEL: u32 = 3;

/// Team name used for workers that carry no team in the skill matrix.
pub const UNGROUPED_TEAM: &str = "Unassigned";

/// One production requirement row: a product needs `required_headcount`
/// workers at a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub product_code: String,
    pub position_code: String,
    pub required_headcount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRequirement {
    pub position_code: String,
    pub work_center: String,
    pub required_skill_level: u32,
}

/// A row of the skill matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub worker_id: String,
    pub name: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub skills: BTreeMap<String, u32>,
}

impl Worker {
    pub fn skill_at(&self, position_code: &str) -> u32 {
        self.skills.get(position_code).copied().unwrap_or(0)
    }

    /// Named team, treating an empty string the same as no team.
    pub fn team_name(&self) -> Option<&str> {
        self.team.as_deref().filter(|team| !team.trim().is_empty())
    }

    /// Positions where the worker holds at least `minimum` skill, in code order.
    pub fn positions_at_or_above(&self, minimum: u32) -> Vec<&str> {
        self.skills
            .iter()
            .filter(|(_, level)| **level >= minimum)
            .map(|(code, _)| code.as_str())
            .collect()
    }
}

/// A worker placed on a position for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub position_code: String,
    pub worker_id: String,
    pub worker_name: String,
    pub skill_level: u32,
    pub team: String,
    pub work_center: String,
    pub date: NaiveDate,
}

/// Aggregated view over the assignments made for one position on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionGroup {
    pub position_code: String,
    pub work_center: String,
    pub team: String,
    pub required_skill_label: String,
    pub required_headcount: u32,
    pub assigned_headcount: u32,
    pub workers: Vec<Assignment>,
}

impl PositionGroup {
    pub fn required_level(&self) -> u32 {
        parse_level_label(&self.required_skill_label).unwrap_or(DEFAULT_REQUIRED_LEVEL)
    }

    pub fn is_fully_staffed(&self) -> bool {
        self.assigned_headcount >= self.required_headcount
    }

    pub fn contains_worker(&self, worker_id: &str) -> bool {
        self.workers.iter().any(|worker| worker.worker_id == worker_id)
    }
}

pub fn level_label(level: u32) -> String {
    format!("Level {level}")
}

pub(crate) fn parse_level_label(label: &str) -> Option<u32> {
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Team key used when grouping workloads; empty teams fold into [`UNGROUPED_TEAM`].
pub(crate) fn team_key(team: &str) -> &str {
    if team.trim().is_empty() {
        UNGROUPED_TEAM
    } else {
        team
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    Sick,
    Personal,
    Annual,
    Other,
}

impl LeaveType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sick => "Sick Leave",
            Self::Personal => "Personal Leave",
            Self::Annual => "Annual Leave",
            Self::Other => "Other",
        }
    }

    pub(crate) fn from_str_lossy(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "sick" | "sick leave" => Self::Sick,
            "personal" | "personal leave" => Self::Personal,
            "annual" | "annual leave" | "vacation" => Self::Annual,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl Urgency {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub(crate) fn from_str_lossy(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" | "urgent" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }
}

/// A reported absence for one worker on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRecord {
    pub worker_id: String,
    pub name: String,
    pub date: NaiveDate,
    pub leave_type: LeaveType,
    pub hours: f64,
    pub affected_positions: Vec<String>,
    pub urgency: Urgency,
}

/// The three upstream tables the engine consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffingDataset {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub positions: Vec<PositionRequirement>,
    #[serde(default)]
    pub workers: Vec<Worker>,
}

impl StaffingDataset {
    pub fn validate(&self) -> Result<(), StaffingError> {
        if self.tasks.is_empty() {
            return Err(StaffingError::MissingInput(MissingInput::Tasks));
        }
        if self.positions.is_empty() {
            return Err(StaffingError::MissingInput(MissingInput::PositionCatalog));
        }
        if self.workers.is_empty() {
            return Err(StaffingError::MissingInput(MissingInput::SkillMatrix));
        }
        Ok(())
    }

    pub fn requirement(&self, position_code: &str) -> Option<&PositionRequirement> {
        self.positions
            .iter()
            .find(|position| position.position_code == position_code)
    }

    pub fn worker(&self, worker_id: &str) -> Option<&Worker> {
        self.workers
            .iter()
            .find(|worker| worker.worker_id == worker_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingInput {
    Tasks,
    PositionCatalog,
    SkillMatrix,
    ProductCode,
}

impl MissingInput {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tasks => "task data",
            Self::PositionCatalog => "position requirement catalog",
            Self::SkillMatrix => "skill matrix",
            Self::ProductCode => "product code",
        }
    }
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StaffingError {
    #[error("missing required input: {0}")]
    MissingInput(MissingInput),
}
