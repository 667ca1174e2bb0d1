//! Leave impact and adjustment recommendations.
//!
//! Given a day's position groups and the absences reported for that day, the
//! recommender summarizes team workloads and proposes internal reassignment,
//! cross-team borrowing, and overtime for every short-staffed position. An
//! empty suggestion list for a shortage means no automatic remedy exists.

mod strategies;
mod views;
mod workload;

pub use views::{
    AdjustedWorker, AdjustmentPlan, AdjustmentSuggestion, AdjustmentType, AffectedPosition,
    CycleTimeImpact, EfficiencyImpact, LeaveImpactAnalysis, PositionImpact, ReassignableWorker,
    TeamWorkload,
};

use super::domain::{LeaveRecord, PositionGroup, Worker};
use chrono::NaiveDate;
use std::collections::HashSet;
use strategies::Shortage;
use tracing::{debug, info};

/// Efficiency loss above which a single absence warrants an immediate replacement.
const IMMEDIATE_ACTION_LOSS: f64 = 20.0;

#[derive(Debug, Clone, Copy)]
pub struct AdjustmentRecommender<'a> {
    skill_matrix: &'a [Worker],
}

struct AffectedGroup<'g> {
    group: &'g PositionGroup,
    leave_ids: Vec<&'g str>,
}

impl<'a> AdjustmentRecommender<'a> {
    pub fn new(skill_matrix: &'a [Worker]) -> Self {
        Self { skill_matrix }
    }

    /// Team workloads plus ranked suggestions for `date`. Leave records for
    /// other dates are ignored.
    pub fn recommend(
        &self,
        date: NaiveDate,
        product_code: &str,
        groups: &[PositionGroup],
        leaves: &[LeaveRecord],
    ) -> AdjustmentPlan {
        let todays_leaves: Vec<&LeaveRecord> =
            leaves.iter().filter(|leave| leave.date == date).collect();
        let on_leave: HashSet<&str> = todays_leaves
            .iter()
            .map(|leave| leave.worker_id.as_str())
            .collect();

        let team_workloads = workload::team_workloads(groups, &on_leave, self.skill_matrix);

        let mut affected: Vec<AffectedGroup<'_>> = Vec::new();
        for leave in &todays_leaves {
            for code in &leave.affected_positions {
                let Some(group) = groups.iter().find(|g| &g.position_code == code) else {
                    continue;
                };
                let index = match affected
                    .iter()
                    .position(|entry| entry.group.position_code == group.position_code)
                {
                    Some(index) => index,
                    None => {
                        affected.push(AffectedGroup {
                            group,
                            leave_ids: Vec::new(),
                        });
                        affected.len() - 1
                    }
                };
                let entry = &mut affected[index];
                if !entry.leave_ids.contains(&leave.worker_id.as_str()) {
                    entry.leave_ids.push(leave.worker_id.as_str());
                }
            }
        }

        let mut affected_positions = Vec::with_capacity(affected.len());
        let mut suggestions = Vec::new();

        for entry in &affected {
            let group = entry.group;
            let on_leave_count = entry.leave_ids.len() as u32;
            // Leave-takers outside the group still count, so `present` may go negative.
            let present = i64::from(group.assigned_headcount) - i64::from(on_leave_count);
            let shortage =
                u32::try_from(i64::from(group.required_headcount) - present).unwrap_or(0);

            affected_positions.push(AffectedPosition {
                position_code: group.position_code.clone(),
                required_headcount: group.required_headcount,
                assigned_headcount: group.assigned_headcount,
                on_leave: on_leave_count,
                shortage,
            });

            if shortage == 0 {
                continue;
            }

            let context = Shortage {
                group,
                shortage,
                on_leave: &on_leave,
                product_code,
            };
            let found = [
                strategies::internal_team(&context, &team_workloads),
                strategies::cross_team(&context, &team_workloads),
                strategies::overtime(&context),
            ];
            let before = suggestions.len();
            suggestions.extend(found.into_iter().flatten());

            debug!(
                %date,
                position = %group.position_code,
                shortage,
                remedies = suggestions.len() - before,
                "shortage evaluated"
            );
        }

        suggestions.sort_by(|a, b| b.priority.cmp(&a.priority));

        info!(
            %date,
            leaves = todays_leaves.len(),
            affected = affected_positions.len(),
            suggestions = suggestions.len(),
            "adjustment plan computed"
        );

        AdjustmentPlan {
            date,
            team_workloads,
            affected_positions,
            suggestions,
        }
    }
}

/// Capacity left on each position a single absence touches.
pub fn analyze_leave_impact(groups: &[PositionGroup], leave: &LeaveRecord) -> LeaveImpactAnalysis {
    let mut positions = Vec::new();
    let mut suggested_actions = Vec::new();

    for code in &leave.affected_positions {
        let Some(group) = groups.iter().find(|g| &g.position_code == code) else {
            continue;
        };

        let remaining_capacity = if group.required_headcount > 0 {
            (f64::from(group.assigned_headcount) - 1.0) / f64::from(group.required_headcount)
        } else {
            0.0
        };
        let efficiency_loss = ((1.0 - remaining_capacity) * 100.0).max(0.0);

        if efficiency_loss > IMMEDIATE_ACTION_LOSS {
            suggested_actions.push(format!(
                "{code}: efficiency loss {efficiency_loss:.1}%, arrange a replacement immediately"
            ));
        }

        positions.push(PositionImpact {
            position_code: code.clone(),
            assigned_headcount: group.assigned_headcount,
            required_headcount: group.required_headcount,
            remaining_capacity,
            efficiency_loss,
        });
    }

    LeaveImpactAnalysis {
        worker_id: leave.worker_id.clone(),
        positions,
        suggested_actions,
    }
}
