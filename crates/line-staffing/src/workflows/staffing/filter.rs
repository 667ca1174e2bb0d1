use super::domain::PositionGroup;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStatus {
    #[default]
    All,
    Full,
    Short,
}

impl FillStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Full => "Fully Staffed",
            Self::Short => "Short-Staffed",
        }
    }

    fn admits(self, group: &PositionGroup) -> bool {
        match self {
            Self::All => true,
            Self::Full => group.is_fully_staffed(),
            Self::Short => !group.is_fully_staffed(),
        }
    }
}

/// Narrowing criteria for a day's position groups. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionGroupFilter {
    pub position_code: Option<String>,
    pub work_center: Option<String>,
    pub team: Option<String>,
    pub fill_status: FillStatus,
    pub keyword: Option<String>,
}

impl PositionGroupFilter {
    pub fn matches(&self, group: &PositionGroup) -> bool {
        if let Some(code) = active(&self.position_code) {
            if !group.position_code.contains(code) {
                return false;
            }
        }

        if let Some(center) = active(&self.work_center) {
            if group.work_center != center {
                return false;
            }
        }

        if let Some(team) = active(&self.team) {
            if !group.workers.iter().any(|worker| worker.team == team) {
                return false;
            }
        }

        if !self.fill_status.admits(group) {
            return false;
        }

        match active(&self.keyword) {
            Some(keyword) => matches_keyword(group, &keyword.to_lowercase()),
            None => true,
        }
    }

    pub fn apply<'g>(&self, groups: &'g [PositionGroup]) -> Vec<&'g PositionGroup> {
        groups.iter().filter(|group| self.matches(group)).collect()
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn matches_keyword(group: &PositionGroup, keyword: &str) -> bool {
    group.position_code.to_lowercase().contains(keyword)
        || group.work_center.to_lowercase().contains(keyword)
        || group.workers.iter().any(|worker| {
            worker.worker_name.to_lowercase().contains(keyword)
                || worker.worker_id.to_lowercase().contains(keyword)
        })
}

/// Distinct values available to populate filter choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub position_codes: Vec<String>,
    pub work_centers: Vec<String>,
    pub teams: Vec<String>,
}

pub fn filter_options(groups: &[PositionGroup]) -> FilterOptions {
    let mut codes = BTreeSet::new();
    let mut centers = BTreeSet::new();
    let mut teams = BTreeSet::new();

    for group in groups {
        codes.insert(group.position_code.as_str());
        centers.insert(group.work_center.as_str());
        for worker in &group.workers {
            if !worker.team.trim().is_empty() {
                teams.insert(worker.team.as_str());
            }
        }
    }

    FilterOptions {
        position_codes: codes.into_iter().map(str::to_string).collect(),
        work_centers: centers.into_iter().map(str::to_string).collect(),
        teams: teams.into_iter().map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::staffing::domain::{level_label, Assignment};
    use chrono::NaiveDate;

    fn assignment(code: &str, id: &str, name: &str, team: &str, center: &str) -> Assignment {
        Assignment {
            position_code: code.to_string(),
            worker_id: id.to_string(),
            worker_name: name.to_string(),
            skill_level: 3,
            team: team.to_string(),
            work_center: center.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 3).expect("valid date"),
        }
    }

    fn groups() -> Vec<PositionGroup> {
        vec![
            PositionGroup {
                position_code: "WELD-01".to_string(),
                work_center: "Body".to_string(),
                team: "Alpha".to_string(),
                required_skill_label: level_label(3),
                required_headcount: 1,
                assigned_headcount: 1,
                workers: vec![assignment("WELD-01", "W1", "Mara Lind", "Alpha", "Body")],
            },
            PositionGroup {
                position_code: "PAINT-02".to_string(),
                work_center: "Finish".to_string(),
                team: "Beta".to_string(),
                required_skill_label: level_label(2),
                required_headcount: 2,
                assigned_headcount: 1,
                workers: vec![assignment("PAINT-02", "W2", "Jon Park", "Beta", "Finish")],
            },
            PositionGroup {
                position_code: "WELD-03".to_string(),
                work_center: "Body".to_string(),
                team: String::new(),
                required_skill_label: level_label(3),
                required_headcount: 1,
                assigned_headcount: 0,
                workers: Vec::new(),
            },
        ]
    }

    fn codes(groups: Vec<&PositionGroup>) -> Vec<&str> {
        groups.iter().map(|g| g.position_code.as_str()).collect()
    }

    #[test]
    fn default_filter_keeps_everything() {
        let groups = groups();
        assert_eq!(PositionGroupFilter::default().apply(&groups).len(), 3);
    }

    #[test]
    fn fill_status_separates_full_and_short_groups() {
        let groups = groups();
        let short = PositionGroupFilter {
            fill_status: FillStatus::Short,
            ..PositionGroupFilter::default()
        };
        assert_eq!(codes(short.apply(&groups)), vec!["PAINT-02", "WELD-03"]);

        let full = PositionGroupFilter {
            fill_status: FillStatus::Full,
            ..PositionGroupFilter::default()
        };
        assert_eq!(codes(full.apply(&groups)), vec!["WELD-01"]);
        assert_eq!(FillStatus::Short.label(), "Short-Staffed");
    }

    #[test]
    fn criteria_combine() {
        let groups = groups();
        let filter = PositionGroupFilter {
            position_code: Some("WELD".to_string()),
            work_center: Some("Body".to_string()),
            team: Some("Alpha".to_string()),
            ..PositionGroupFilter::default()
        };
        assert_eq!(codes(filter.apply(&groups)), vec!["WELD-01"]);
    }

    #[test]
    fn keyword_matches_worker_names_case_insensitively() {
        let groups = groups();
        let filter = PositionGroupFilter {
            keyword: Some("  jon ".to_string()),
            ..PositionGroupFilter::default()
        };
        assert_eq!(codes(filter.apply(&groups)), vec!["PAINT-02"]);
    }

    #[test]
    fn options_are_sorted_and_skip_blank_teams() {
        let options = filter_options(&groups());
        assert_eq!(options.position_codes, vec!["PAINT-02", "WELD-01", "WELD-03"]);
        assert_eq!(options.work_centers, vec!["Body", "Finish"]);
        assert_eq!(options.teams, vec!["Alpha", "Beta"]);
    }
}
