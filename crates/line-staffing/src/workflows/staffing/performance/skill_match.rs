use super::super::domain::PositionGroup;
use super::config::PerformanceConfig;
use super::percentage;
use super::views::{
    MatchStatus, PositionMatch, SkillMatchReport, Trainee, TrainingDuration, TrainingPlan,
    TrainingPriority, WorkerSkillGap,
};

pub(crate) fn score_skill_match(
    groups: &[PositionGroup],
    config: &PerformanceConfig,
) -> SkillMatchReport {
    let mut positions = Vec::with_capacity(groups.len());
    let mut training_plans = Vec::new();
    let mut total_meeting = 0usize;
    let mut total_assigned = 0usize;

    for group in groups {
        let required_level = group.required_level();
        let workers: Vec<WorkerSkillGap> = group
            .workers
            .iter()
            .map(|worker| WorkerSkillGap {
                worker_id: worker.worker_id.clone(),
                name: worker.worker_name.clone(),
                actual_skill: worker.skill_level,
                skill_gap: required_level.saturating_sub(worker.skill_level),
            })
            .collect();

        let assigned_count = workers.len();
        let meeting_count = workers.iter().filter(|w| w.skill_gap == 0).count();
        let skill_total: u32 = workers.iter().map(|w| w.actual_skill).sum();
        let average_skill = if assigned_count > 0 {
            f64::from(skill_total) / assigned_count as f64
        } else {
            0.0
        };
        let match_rate = percentage(meeting_count as f64, assigned_count as f64);
        let status = match_status(meeting_count, assigned_count, match_rate, config);

        total_meeting += meeting_count;
        total_assigned += assigned_count;

        let trainees: Vec<Trainee> = workers
            .iter()
            .filter(|worker| worker.skill_gap > 0)
            .map(|worker| {
                let duration = TrainingDuration::for_gap(worker.skill_gap);
                Trainee {
                    worker_id: worker.worker_id.clone(),
                    name: worker.name.clone(),
                    current_skill: worker.actual_skill,
                    target_skill: required_level,
                    content: format!("{} position skill upgrade training", group.position_code),
                    duration,
                    duration_label: duration.label(),
                }
            })
            .collect();

        if !trainees.is_empty() && status != MatchStatus::FullyMatched {
            let priority = training_priority(match_rate, config);
            training_plans.push(TrainingPlan {
                position_code: group.position_code.clone(),
                work_center: group.work_center.clone(),
                trainees,
                priority,
                priority_label: priority.label(),
            });
        }

        positions.push(PositionMatch {
            position_code: group.position_code.clone(),
            work_center: group.work_center.clone(),
            required_level,
            average_skill,
            meeting_count,
            assigned_count,
            match_rate,
            status,
            status_label: status.label(),
            workers,
        });
    }

    training_plans.sort_by_key(|plan| plan.priority);

    SkillMatchReport {
        overall_match_rate: percentage(total_meeting as f64, total_assigned as f64),
        positions,
        training_plans,
    }
}

fn match_status(
    meeting: usize,
    assigned: usize,
    match_rate: f64,
    config: &PerformanceConfig,
) -> MatchStatus {
    if assigned > 0 && meeting == assigned {
        MatchStatus::FullyMatched
    } else if match_rate >= config.adequate_match_threshold {
        MatchStatus::AdequatelyMatched
    } else {
        MatchStatus::NeedsTraining
    }
}

fn training_priority(match_rate: f64, config: &PerformanceConfig) -> TrainingPriority {
    if match_rate < config.high_priority_below {
        TrainingPriority::High
    } else if match_rate < config.medium_priority_below {
        TrainingPriority::Medium
    } else {
        TrainingPriority::Low
    }
}
