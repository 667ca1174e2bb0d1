use super::super::domain::{team_key, PositionGroup, Worker};
use super::super::performance::percentage;
use super::views::{ReassignableWorker, TeamWorkload};
use std::collections::{BTreeMap, HashSet};

/// Minimum skill at the currently held position to be lent out.
const POOL_MIN_HELD_SKILL: u32 = 3;
/// Minimum skill for a position to count toward versatility.
const POOL_SUPPORT_SKILL: u32 = 2;

/// Per-team headcount, leave, and reassignable pool, in first-seen team order.
pub(crate) fn team_workloads(
    groups: &[PositionGroup],
    on_leave: &HashSet<&str>,
    skill_matrix: &[Worker],
) -> Vec<TeamWorkload> {
    let mut workloads: Vec<TeamWorkload> = Vec::new();

    for assignment in groups.iter().flat_map(|group| group.workers.iter()) {
        let team = team_key(&assignment.team);
        let index = match workloads.iter().position(|w| w.team == team) {
            Some(index) => index,
            None => {
                workloads.push(TeamWorkload {
                    team: team.to_string(),
                    total_workers: 0,
                    on_duty_workers: 0,
                    on_leave_workers: 0,
                    skill_distribution: BTreeMap::new(),
                    utilization_rate: 0.0,
                    reassignable_pool: Vec::new(),
                });
                workloads.len() - 1
            }
        };
        let workload = &mut workloads[index];

        workload.total_workers += 1;
        *workload
            .skill_distribution
            .entry(assignment.skill_level)
            .or_insert(0) += 1;

        if on_leave.contains(assignment.worker_id.as_str()) {
            workload.on_leave_workers += 1;
            continue;
        }
        workload.on_duty_workers += 1;

        if assignment.skill_level < POOL_MIN_HELD_SKILL
            || workload
                .reassignable_pool
                .iter()
                .any(|pooled| pooled.worker_id == assignment.worker_id)
        {
            continue;
        }

        let Some(worker) = skill_matrix
            .iter()
            .find(|worker| worker.worker_id == assignment.worker_id)
        else {
            continue;
        };

        let supported = worker.positions_at_or_above(POOL_SUPPORT_SKILL);
        if supported.len() > 1 {
            workload.reassignable_pool.push(ReassignableWorker {
                worker_id: worker.worker_id.clone(),
                name: worker.name.clone(),
                supported_positions: supported.iter().map(|code| code.to_string()).collect(),
                skill_by_position: supported
                    .iter()
                    .map(|code| (code.to_string(), worker.skill_at(code)))
                    .collect(),
            });
        }
    }

    for workload in &mut workloads {
        workload.utilization_rate =
            percentage(workload.on_duty_workers as f64, workload.total_workers as f64);
    }

    workloads
}
