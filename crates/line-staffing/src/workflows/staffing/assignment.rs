use super::domain::{
    level_label, Assignment, MissingInput, PositionGroup, StaffingDataset, StaffingError, Worker,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Sort key for workers without a team. Compared as a plain string, so team
/// names ordering after it (including CJK names) rank behind unnamed workers.
const UNNAMED_TEAM_SORT_KEY: &str = "zzz";

/// Assignments and position groups produced for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub product_code: String,
    pub assignments: Vec<Assignment>,
    pub groups: Vec<PositionGroup>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub positions: usize,
    pub assigned_headcount: usize,
    pub required_headcount: u32,
}

impl DaySchedule {
    pub fn summary(&self) -> DaySummary {
        DaySummary {
            positions: self.groups.len(),
            assigned_headcount: self.assignments.len(),
            required_headcount: self.groups.iter().map(|g| g.required_headcount).sum(),
        }
    }

    pub fn assigned_worker_ids(&self) -> impl Iterator<Item = &str> {
        self.assignments.iter().map(|a| a.worker_id.as_str())
    }
}

/// Greedy, team-coherent assignment of workers to positions.
///
/// The engine borrows a validated [`StaffingDataset`]; every call is pure and
/// deterministic for a given dataset and exclusion set.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentEngine<'a> {
    dataset: &'a StaffingDataset,
}

struct Candidate<'w> {
    worker: &'w Worker,
    skill: u32,
}

impl<'a> AssignmentEngine<'a> {
    pub fn new(dataset: &'a StaffingDataset) -> Result<Self, StaffingError> {
        dataset.validate()?;
        Ok(Self { dataset })
    }

    /// Assign workers for `product_code` on `date`, skipping anyone in
    /// `already_assigned`.
    pub fn assign_day(
        &self,
        date: NaiveDate,
        product_code: &str,
        already_assigned: &HashSet<String>,
    ) -> Result<DaySchedule, StaffingError> {
        let product_code = product_code.trim();
        if product_code.is_empty() {
            return Err(StaffingError::MissingInput(MissingInput::ProductCode));
        }

        let mut taken: HashSet<&str> = already_assigned.iter().map(String::as_str).collect();
        let mut assignments = Vec::new();
        let mut groups = Vec::new();

        for (position_code, required) in effective_requirements(self.dataset, product_code) {
            let Some(requirement) = self.dataset.requirement(position_code) else {
                warn!(%date, position_code, "no position requirement found; task skipped");
                continue;
            };

            let candidates = self.ranked_candidates(position_code, &taken);
            let admitted = fill_position(
                &candidates,
                required,
                requirement.required_skill_level,
                &mut taken,
            );

            let workers: Vec<Assignment> = admitted
                .into_iter()
                .map(|candidate| Assignment {
                    position_code: position_code.to_string(),
                    worker_id: candidate.worker.worker_id.clone(),
                    worker_name: candidate.worker.name.clone(),
                    skill_level: candidate.skill,
                    team: candidate.worker.team_name().unwrap_or_default().to_string(),
                    work_center: requirement.work_center.clone(),
                    date,
                })
                .collect();

            debug!(
                %date,
                position_code,
                required,
                assigned = workers.len(),
                candidates = candidates.len(),
                "position filled"
            );

            assignments.extend(workers.iter().cloned());
            groups.push(PositionGroup {
                position_code: position_code.to_string(),
                work_center: requirement.work_center.clone(),
                team: workers
                    .first()
                    .map(|first| first.team.clone())
                    .unwrap_or_default(),
                required_skill_label: level_label(requirement.required_skill_level),
                required_headcount: required,
                assigned_headcount: workers.len() as u32,
                workers,
            });
        }

        info!(
            %date,
            product_code,
            positions = groups.len(),
            assigned = assignments.len(),
            "day schedule computed"
        );

        Ok(DaySchedule {
            date,
            product_code: product_code.to_string(),
            assignments,
            groups,
        })
    }

    fn ranked_candidates(
        &self,
        position_code: &str,
        taken: &HashSet<&str>,
    ) -> Vec<Candidate<'a>> {
        let mut candidates: Vec<Candidate<'a>> = self
            .dataset
            .workers
            .iter()
            .filter(|worker| !taken.contains(worker.worker_id.as_str()))
            .filter_map(|worker| {
                let skill = worker.skill_at(position_code);
                (skill > 0).then_some(Candidate { worker, skill })
            })
            .collect();

        candidates.sort_by(compare_candidates);
        candidates
    }
}

/// Sums headcount per position for one product, keeping first-seen order and
/// dropping positions whose total is zero.
fn effective_requirements<'d>(
    dataset: &'d StaffingDataset,
    product_code: &str,
) -> Vec<(&'d str, u32)> {
    let mut merged: Vec<(&'d str, u32)> = Vec::new();

    for task in dataset
        .tasks
        .iter()
        .filter(|task| task.product_code == product_code)
    {
        match merged
            .iter_mut()
            .find(|(code, _)| *code == task.position_code)
        {
            Some((_, total)) => *total += task.required_headcount,
            None => merged.push((task.position_code.as_str(), task.required_headcount)),
        }
    }

    merged.retain(|(_, total)| *total > 0);
    merged
}

/// Same team first keyed by team name, with unnamed workers keyed as
/// [`UNNAMED_TEAM_SORT_KEY`], then skill descending. The sort is stable so
/// ties keep skill-matrix order.
fn compare_candidates(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    fn team_rank<'t>(candidate: &'t Candidate<'_>) -> &'t str {
        candidate.worker.team_name().unwrap_or(UNNAMED_TEAM_SORT_KEY)
    }

    team_rank(a)
        .cmp(team_rank(b))
        .then_with(|| b.skill.cmp(&a.skill))
}

fn fill_position<'c, 'w>(
    candidates: &'c [Candidate<'w>],
    required: u32,
    required_level: u32,
    taken: &mut HashSet<&'w str>,
) -> Vec<&'c Candidate<'w>> {
    let required = required as usize;
    let mut admitted = Vec::new();

    // Qualified workers first, then fall back to anyone with some proficiency.
    for qualified_pass in [true, false] {
        for candidate in candidates {
            if admitted.len() >= required {
                return admitted;
            }
            let worker_id = candidate.worker.worker_id.as_str();
            if taken.contains(worker_id) {
                continue;
            }
            if qualified_pass == (candidate.skill >= required_level) {
                taken.insert(worker_id);
                admitted.push(candidate);
            }
        }
    }

    admitted
}
