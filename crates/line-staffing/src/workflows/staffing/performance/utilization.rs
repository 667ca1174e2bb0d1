use super::super::domain::PositionGroup;
use super::config::PerformanceConfig;
use super::percentage;
use super::views::{
    Difficulty, EfficiencyCause, LowEfficiencyPosition, OptimizationKind, OptimizationSuggestion,
    UtilizationReport,
};

pub(crate) fn score_utilization(
    groups: &[PositionGroup],
    config: &PerformanceConfig,
) -> UtilizationReport {
    let standard_hours = config.standard_hours_per_day;
    let mut low_efficiency = Vec::new();
    let mut suggestions = Vec::new();
    let mut total_actual = 0.0;
    let mut total_required = 0.0;

    for group in groups {
        let actual_hours = f64::from(group.assigned_headcount) * standard_hours;
        let required_hours = f64::from(group.required_headcount) * standard_hours;
        let utilization = percentage(actual_hours, required_hours);

        total_actual += actual_hours;
        total_required += required_hours;

        if group.required_headcount == 0 || utilization >= config.low_efficiency_threshold {
            continue;
        }

        let gap_hours = (required_hours - actual_hours).max(0.0);
        let required_level = group.required_level();
        let under_skilled = group
            .workers
            .iter()
            .filter(|worker| worker.skill_level < required_level)
            .count();
        let understaffed = group.assigned_headcount < group.required_headcount;

        let mut causes = Vec::new();
        if understaffed {
            causes.push(EfficiencyCause::Understaffed);
        }
        if under_skilled > 0 {
            causes.push(EfficiencyCause::SkillShortfall);
        }
        if causes.is_empty() {
            causes.push(EfficiencyCause::Other);
        }

        if understaffed {
            let shortage = group.required_headcount - group.assigned_headcount;
            let expected = (utilization + percentage(gap_hours, required_hours)).min(100.0);
            suggestions.push(OptimizationSuggestion {
                position_code: group.position_code.clone(),
                kind: OptimizationKind::StaffingIncrease,
                recommendation: format!("Add {shortage} worker(s) to the position"),
                expected_effect: format!("Raise hour utilization to {expected:.1}%"),
                difficulty: Difficulty::Moderate,
            });
        }

        if under_skilled > 0 {
            suggestions.push(OptimizationSuggestion {
                position_code: group.position_code.clone(),
                kind: OptimizationKind::Training,
                recommendation: format!("Provide skill training for {under_skilled} worker(s)"),
                expected_effect: "Improve operating efficiency by 10-20%".to_string(),
                difficulty: Difficulty::Easy,
            });
        }

        if utilization < config.process_review_threshold {
            suggestions.push(OptimizationSuggestion {
                position_code: group.position_code.clone(),
                kind: OptimizationKind::ProcessReview,
                recommendation: "Review the process flow and tighten operating standards"
                    .to_string(),
                expected_effect: "Improve overall efficiency by 5-15%".to_string(),
                difficulty: Difficulty::Hard,
            });
        }

        low_efficiency.push(LowEfficiencyPosition {
            position_code: group.position_code.clone(),
            work_center: group.work_center.clone(),
            utilization,
            standard_hours,
            actual_hours,
            gap_hours,
            causes,
        });
    }

    low_efficiency.sort_by(|a, b| a.utilization.total_cmp(&b.utilization));
    suggestions.sort_by_key(|suggestion| suggestion.difficulty);

    UtilizationReport {
        overall_utilization: percentage(total_actual, total_required),
        low_efficiency,
        suggestions,
    }
}
