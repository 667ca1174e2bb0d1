use super::super::domain::{team_key, PositionGroup};
use super::views::{
    AdjustedWorker, AdjustmentSuggestion, AdjustmentType, CycleTimeImpact, EfficiencyImpact,
    ReassignableWorker, TeamWorkload,
};
use std::collections::HashSet;

const INTERNAL_PRIORITY: u8 = 8;
const CROSS_TEAM_PRIORITY: u8 = 6;
const OVERTIME_PRIORITY: u8 = 4;

/// Lending teams must be below this utilization.
const CROSS_TEAM_MAX_UTILIZATION: f64 = 90.0;
const LOSS_PER_SKILL_LEVEL: f64 = 10.0;
const CRITICAL_HEADCOUNT: u32 = 3;
const CRITICAL_OVERTIME_SHORTAGE: u32 = 2;

/// One short-staffed position awaiting remedies.
pub(crate) struct Shortage<'a> {
    pub group: &'a PositionGroup,
    pub shortage: u32,
    pub on_leave: &'a HashSet<&'a str>,
    pub product_code: &'a str,
}

impl Shortage<'_> {
    fn required_level(&self) -> u32 {
        self.group.required_level()
    }

    fn code(&self) -> &str {
        &self.group.position_code
    }

    fn affected_products(&self) -> Vec<String> {
        vec![self.product_code.to_string()]
    }

    fn is_eligible(&self, worker: &ReassignableWorker, min_skill: u32) -> bool {
        worker.supports(self.code())
            && worker.skill_at(self.code()) >= min_skill
            && !self.group.contains_worker(&worker.worker_id)
    }
}

pub(crate) fn internal_team(
    shortage: &Shortage<'_>,
    workloads: &[TeamWorkload],
) -> Option<AdjustmentSuggestion> {
    let team = team_key(&shortage.group.team);
    let workload = workloads.iter().find(|w| w.team == team)?;
    let min_skill = shortage.required_level().saturating_sub(1);

    let selected: Vec<&ReassignableWorker> = workload
        .reassignable_pool
        .iter()
        .filter(|worker| shortage.is_eligible(worker, min_skill))
        .take(shortage.shortage as usize)
        .collect();

    if selected.is_empty() {
        return None;
    }

    let skills: Vec<u32> = selected.iter().map(|w| w.skill_at(shortage.code())).collect();
    let unfilled = shortage.shortage.saturating_sub(selected.len() as u32);

    Some(AdjustmentSuggestion {
        adjustment_type: AdjustmentType::InternalTeam,
        adjustment_label: AdjustmentType::InternalTeam.label(),
        origin_position: shortage.code().to_string(),
        affected_workers: selected
            .iter()
            .map(|worker| AdjustedWorker {
                worker_id: worker.worker_id.clone(),
                name: worker.name.clone(),
                current_team: workload.team.clone(),
                target_team: None,
                skill_level: worker.skill_at(shortage.code()),
                reason: format!("Internal team support for {}", shortage.code()),
            })
            .collect(),
        efficiency_impact: efficiency_impact(&skills, shortage.required_level()),
        cycle_time_impact: CycleTimeImpact {
            delay_hours: 2.0 * f64::from(unfilled),
            critical_path: shortage.group.required_headcount >= CRITICAL_HEADCOUNT,
            affected_products: shortage.affected_products(),
        },
        implementation_note: format!(
            "Reassign {} worker(s) within {} to position {}",
            selected.len(),
            workload.team,
            shortage.code()
        ),
        priority: INTERNAL_PRIORITY,
    })
}

pub(crate) fn cross_team(
    shortage: &Shortage<'_>,
    workloads: &[TeamWorkload],
) -> Option<AdjustmentSuggestion> {
    let home_team = team_key(&shortage.group.team);
    let min_skill = shortage.required_level().saturating_sub(2);

    let mut available: Vec<(&str, &ReassignableWorker)> = workloads
        .iter()
        .filter(|w| w.team != home_team && w.utilization_rate < CROSS_TEAM_MAX_UTILIZATION)
        .flat_map(|w| {
            w.reassignable_pool
                .iter()
                .filter(move |worker| shortage.is_eligible(worker, min_skill))
                .map(move |worker| (w.team.as_str(), worker))
        })
        .collect();

    available.sort_by(|(_, a), (_, b)| {
        b.skill_at(shortage.code())
            .cmp(&a.skill_at(shortage.code()))
    });
    available.truncate(shortage.shortage as usize);

    if available.is_empty() {
        return None;
    }

    let skills: Vec<u32> = available
        .iter()
        .map(|(_, w)| w.skill_at(shortage.code()))
        .collect();

    Some(AdjustmentSuggestion {
        adjustment_type: AdjustmentType::CrossTeam,
        adjustment_label: AdjustmentType::CrossTeam.label(),
        origin_position: shortage.code().to_string(),
        affected_workers: available
            .iter()
            .map(|(source_team, worker)| AdjustedWorker {
                worker_id: worker.worker_id.clone(),
                name: worker.name.clone(),
                current_team: source_team.to_string(),
                target_team: Some(home_team.to_string()),
                skill_level: worker.skill_at(shortage.code()),
                reason: format!("Cross-team support for {}", shortage.code()),
            })
            .collect(),
        efficiency_impact: efficiency_impact(&skills, shortage.required_level()),
        cycle_time_impact: CycleTimeImpact {
            delay_hours: 0.5 * available.len() as f64,
            critical_path: shortage.group.required_headcount >= CRITICAL_HEADCOUNT,
            affected_products: shortage.affected_products(),
        },
        implementation_note: format!(
            "Borrow {} worker(s) from other teams for position {}; coordinate team schedules",
            available.len(),
            shortage.code()
        ),
        priority: CROSS_TEAM_PRIORITY,
    })
}

pub(crate) fn overtime(shortage: &Shortage<'_>) -> Option<AdjustmentSuggestion> {
    let remaining: Vec<_> = shortage
        .group
        .workers
        .iter()
        .filter(|worker| !shortage.on_leave.contains(worker.worker_id.as_str()))
        .collect();

    if remaining.is_empty() {
        return None;
    }

    let overtime_hours = (2 * shortage.shortage).div_ceil(remaining.len() as u32);
    let skills: Vec<u32> = remaining.iter().map(|w| w.skill_level).collect();

    Some(AdjustmentSuggestion {
        adjustment_type: AdjustmentType::Overtime,
        adjustment_label: AdjustmentType::Overtime.label(),
        origin_position: shortage.code().to_string(),
        affected_workers: remaining
            .iter()
            .map(|worker| AdjustedWorker {
                worker_id: worker.worker_id.clone(),
                name: worker.worker_name.clone(),
                current_team: worker.team.clone(),
                target_team: None,
                skill_level: worker.skill_level,
                reason: format!("{overtime_hours}h overtime to cover the staffing gap"),
            })
            .collect(),
        efficiency_impact: efficiency_impact(&skills, shortage.required_level()),
        cycle_time_impact: CycleTimeImpact {
            delay_hours: 1.5 * f64::from(shortage.shortage),
            critical_path: shortage.shortage >= CRITICAL_OVERTIME_SHORTAGE,
            affected_products: shortage.affected_products(),
        },
        implementation_note: format!(
            "Schedule {overtime_hours}h overtime for on-duty workers at {}; watch fatigue limits",
            shortage.code()
        ),
        priority: OVERTIME_PRIORITY,
    })
}

fn efficiency_impact(skills: &[u32], required_level: u32) -> EfficiencyImpact {
    let origin_loss: f64 = skills
        .iter()
        .map(|skill| f64::from(required_level.saturating_sub(*skill)) * LOSS_PER_SKILL_LEVEL)
        .sum();

    EfficiencyImpact {
        origin_loss,
        target_change: -origin_loss * 0.3,
        overall_impact: origin_loss * 0.7,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::staffing::domain::{level_label, Assignment};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn pooled(id: &str, skills: &[(&str, u32)]) -> ReassignableWorker {
        ReassignableWorker {
            worker_id: id.to_string(),
            name: format!("Worker {id}"),
            supported_positions: skills
                .iter()
                .filter(|(_, level)| *level >= 2)
                .map(|(code, _)| code.to_string())
                .collect(),
            skill_by_position: skills
                .iter()
                .map(|(code, level)| (code.to_string(), *level))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn workload(team: &str, utilization_rate: f64, pool: Vec<ReassignableWorker>) -> TeamWorkload {
        TeamWorkload {
            team: team.to_string(),
            total_workers: 0,
            on_duty_workers: 0,
            on_leave_workers: 0,
            skill_distribution: BTreeMap::new(),
            utilization_rate,
            reassignable_pool: pool,
        }
    }

    fn short_group(level: u32, members: &[&str]) -> PositionGroup {
        PositionGroup {
            position_code: "P1".to_string(),
            work_center: "WC1".to_string(),
            team: "A".to_string(),
            required_skill_label: level_label(level),
            required_headcount: 3,
            assigned_headcount: members.len() as u32,
            workers: members
                .iter()
                .map(|id| Assignment {
                    position_code: "P1".to_string(),
                    worker_id: id.to_string(),
                    worker_name: format!("Worker {id}"),
                    skill_level: level,
                    team: "A".to_string(),
                    work_center: "WC1".to_string(),
                    date: NaiveDate::from_ymd_opt(2025, 3, 4).expect("valid date"),
                })
                .collect(),
        }
    }

    fn proposed(suggestion: Option<AdjustmentSuggestion>) -> Vec<String> {
        suggestion
            .map(|s| s.affected_workers.into_iter().map(|w| w.worker_id).collect())
            .unwrap_or_default()
    }

    #[test]
    fn internal_floor_is_one_below_required_and_pool_order_is_kept() {
        let group = short_group(4, &["A1"]);
        let on_leave = HashSet::new();
        let shortage = Shortage {
            group: &group,
            shortage: 3,
            on_leave: &on_leave,
            product_code: "C1",
        };
        let workloads = vec![workload(
            "A",
            50.0,
            vec![
                pooled("A2", &[("P1", 3), ("P2", 2)]),
                pooled("A3", &[("P1", 2), ("P2", 3)]),
                pooled("A4", &[("P1", 5), ("P2", 2)]),
            ],
        )];

        assert_eq!(
            proposed(internal_team(&shortage, &workloads)),
            vec!["A2", "A4"]
        );
    }

    #[test]
    fn cross_team_floor_is_two_below_required_and_sorted_by_skill() {
        let group = short_group(5, &["A1"]);
        let on_leave = HashSet::new();
        let shortage = Shortage {
            group: &group,
            shortage: 3,
            on_leave: &on_leave,
            product_code: "C1",
        };
        let workloads = vec![
            workload("A", 50.0, vec![pooled("A2", &[("P1", 5), ("P2", 2)])]),
            workload(
                "B",
                50.0,
                vec![
                    pooled("B1", &[("P1", 3), ("P2", 2)]),
                    pooled("B2", &[("P1", 2), ("P2", 3)]),
                    pooled("B3", &[("P1", 4), ("P2", 2)]),
                ],
            ),
        ];

        let suggestion = cross_team(&shortage, &workloads).expect("cross-team cover");
        let borrowed: Vec<(&str, u32)> = suggestion
            .affected_workers
            .iter()
            .map(|w| (w.worker_id.as_str(), w.skill_level))
            .collect();
        assert_eq!(borrowed, vec![("B3", 4), ("B1", 3)]);
        assert_eq!(suggestion.efficiency_impact.origin_loss, 30.0);
    }

    #[test]
    fn lender_utilization_must_stay_below_ninety_percent() {
        let group = short_group(3, &["A1"]);
        let on_leave = HashSet::new();
        let shortage = Shortage {
            group: &group,
            shortage: 2,
            on_leave: &on_leave,
            product_code: "C1",
        };
        let workloads = vec![
            workload("B", 90.0, vec![pooled("B1", &[("P1", 4), ("P2", 2)])]),
            workload("C", 89.9, vec![pooled("C1", &[("P1", 3), ("P2", 2)])]),
        ];

        assert_eq!(proposed(cross_team(&shortage, &workloads)), vec!["C1"]);
    }

    #[test]
    fn existing_group_members_are_not_eligible() {
        let group = short_group(3, &["A1", "A2", "B1"]);
        let on_leave = HashSet::from(["A1"]);
        let shortage = Shortage {
            group: &group,
            shortage: 1,
            on_leave: &on_leave,
            product_code: "C1",
        };
        let workloads = vec![
            workload("A", 50.0, vec![pooled("A2", &[("P1", 4), ("P2", 2)])]),
            workload("B", 50.0, vec![pooled("B1", &[("P1", 4), ("P2", 2)])]),
        ];

        assert!(internal_team(&shortage, &workloads).is_none());
        assert!(cross_team(&shortage, &workloads).is_none());
        assert_eq!(proposed(overtime(&shortage)), vec!["A2", "B1"]);
    }

    #[test]
    fn efficiency_impact_scales_with_total_gap() {
        let impact = efficiency_impact(&[1, 3, 5], 3);
        assert_eq!(impact.origin_loss, 20.0);
        assert!((impact.target_change + 6.0).abs() < 1e-9);
        assert!((impact.overall_impact - 14.0).abs() < 1e-9);
    }

    #[test]
    fn qualified_workers_carry_no_efficiency_loss() {
        let impact = efficiency_impact(&[4, 4], 3);
        assert_eq!(impact.origin_loss, 0.0);
        assert_eq!(impact.overall_impact, 0.0);
    }
}
