use crate::cli::{AdjustArgs, DemoArgs, ScheduleDayArgs, ScheduleWeekArgs};
use crate::infra::{load_leaves, print_json};
use chrono::Local;
use line_staffing::config::AppConfig;
use line_staffing::error::AppError;
use line_staffing::workflows::staffing::adjustment::LeaveImpactAnalysis;
use line_staffing::workflows::staffing::domain::{LeaveType, PositionRequirement, Task, Urgency};
use line_staffing::workflows::staffing::{
    analyze_leave_impact, week_of, AdjustmentPlan, AdjustmentRecommender, AssignmentEngine,
    DaySchedule, FillStatus, LeaveRecord, PerformanceConfig, PerformanceReport,
    PerformanceScorer, PositionGroupFilter, StaffingDataset, WeeklySchedule, Worker,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

#[derive(Serialize)]
struct DayOutput<'a> {
    schedule: &'a DaySchedule,
    performance: &'a PerformanceReport,
}

#[derive(Serialize)]
struct AdjustOutput<'a> {
    plan: &'a AdjustmentPlan,
    leave_impacts: &'a [LeaveImpactAnalysis],
}

fn performance_config() -> Result<PerformanceConfig, AppError> {
    Ok(AppConfig::load()?.performance)
}

pub(crate) fn run_schedule_day(args: ScheduleDayArgs) -> Result<(), AppError> {
    let dataset = args.dataset.load()?;
    let engine = AssignmentEngine::new(&dataset)?;
    let schedule = engine.assign_day(args.date, &args.product, &HashSet::new())?;
    let report = PerformanceScorer::new(performance_config()?).score(&schedule.groups);

    if args.json {
        print_json(&DayOutput {
            schedule: &schedule,
            performance: &report,
        });
    } else {
        render_day(&schedule, args.status);
        render_performance(&report);
    }

    Ok(())
}

pub(crate) fn run_schedule_week(args: ScheduleWeekArgs) -> Result<(), AppError> {
    let dataset = args.dataset.load()?;
    let engine = AssignmentEngine::new(&dataset)?;
    let week = engine.assign_week(&week_of(args.week_of), &args.product)?;

    if args.json {
        print_json(&week);
    } else {
        render_week(&week);
    }

    Ok(())
}

pub(crate) fn run_adjust(args: AdjustArgs) -> Result<(), AppError> {
    let dataset = args.dataset.load()?;
    let leaves = load_leaves(&args.leaves)?;
    let engine = AssignmentEngine::new(&dataset)?;
    let schedule = engine.assign_day(args.date, &args.product, &HashSet::new())?;

    let (plan, impacts) = plan_cover(&dataset, &schedule, &leaves);

    if args.json {
        print_json(&AdjustOutput {
            plan: &plan,
            leave_impacts: &impacts,
        });
    } else {
        render_plan(&plan, &leaves, &impacts);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { date, skip_week } = args;
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let dataset = demo_dataset();
    let engine = AssignmentEngine::new(&dataset)?;

    println!("Line staffing demo for product {}", DEMO_PRODUCT);
    let schedule = engine.assign_day(date, DEMO_PRODUCT, &HashSet::new())?;
    render_day(&schedule, FillStatus::All);

    let report = PerformanceScorer::new(performance_config()?).score(&schedule.groups);
    render_performance(&report);

    let leaves = demo_leaves(&schedule);
    if leaves.is_empty() {
        println!("\nNo assigned workers to send on leave; skipping adjustment demo");
    } else {
        let (plan, impacts) = plan_cover(&dataset, &schedule, &leaves);
        render_plan(&plan, &leaves, &impacts);
    }

    if !skip_week {
        let week = engine.assign_week(&week_of(date), DEMO_PRODUCT)?;
        render_week(&week);
    }

    Ok(())
}

fn plan_cover(
    dataset: &StaffingDataset,
    schedule: &DaySchedule,
    leaves: &[LeaveRecord],
) -> (AdjustmentPlan, Vec<LeaveImpactAnalysis>) {
    let plan = AdjustmentRecommender::new(&dataset.workers).recommend(
        schedule.date,
        &schedule.product_code,
        &schedule.groups,
        leaves,
    );
    let impacts = leaves
        .iter()
        .filter(|leave| leave.date == schedule.date)
        .map(|leave| analyze_leave_impact(&schedule.groups, leave))
        .collect();
    (plan, impacts)
}

fn render_day(schedule: &DaySchedule, status: FillStatus) {
    let summary = schedule.summary();
    let filter = PositionGroupFilter {
        fill_status: status,
        ..PositionGroupFilter::default()
    };
    println!(
        "\nSchedule for {} ({}): {} positions | {}/{} workers assigned",
        schedule.date,
        schedule.product_code,
        summary.positions,
        summary.assigned_headcount,
        summary.required_headcount
    );
    if status != FillStatus::All {
        println!("Showing {} positions only", status.label());
    }
    for group in filter.apply(&schedule.groups) {
        let team = if group.team.is_empty() {
            "-"
        } else {
            group.team.as_str()
        };
        println!(
            "- {} @ {} [{}] {}/{} team {}",
            group.position_code,
            group.work_center,
            group.required_skill_label,
            group.assigned_headcount,
            group.required_headcount,
            team
        );
        for worker in &group.workers {
            println!(
                "    {} {} (skill {})",
                worker.worker_id, worker.worker_name, worker.skill_level
            );
        }
    }
}

fn render_performance(report: &PerformanceReport) {
    let skill = &report.skill_match;
    let hours = &report.hour_utilization;
    println!(
        "\nSkill match {:.1}% | hour utilization {:.1}%",
        skill.overall_match_rate, hours.overall_utilization
    );
    for position in &skill.positions {
        println!(
            "- {}: {:.1}% ({}/{}) {}",
            position.position_code,
            position.match_rate,
            position.meeting_count,
            position.assigned_count,
            position.status_label
        );
    }
    for plan in &skill.training_plans {
        println!(
            "  Training [{}] {}: {} trainee(s)",
            plan.priority_label,
            plan.position_code,
            plan.trainees.len()
        );
        for trainee in &plan.trainees {
            println!(
                "    {} level {} -> {} over {}",
                trainee.name, trainee.current_skill, trainee.target_skill, trainee.duration_label
            );
        }
    }
    for position in &hours.low_efficiency {
        let causes: Vec<&str> = position.causes.iter().map(|cause| cause.label()).collect();
        println!(
            "  Low efficiency {}: {:.1}% ({})",
            position.position_code,
            position.utilization,
            causes.join(", ")
        );
    }
    for suggestion in &hours.suggestions {
        println!(
            "  Suggestion [{}] {}: {}",
            suggestion.difficulty.label(),
            suggestion.position_code,
            suggestion.recommendation
        );
    }
}

fn render_plan(plan: &AdjustmentPlan, leaves: &[LeaveRecord], impacts: &[LeaveImpactAnalysis]) {
    println!("\nAbsence cover for {}", plan.date);
    for leave in leaves.iter().filter(|leave| leave.date == plan.date) {
        println!(
            "- {} {}: {} {:.1}h, {} urgency",
            leave.worker_id,
            leave.name,
            leave.leave_type.label(),
            leave.hours,
            leave.urgency.label()
        );
    }
    for team in &plan.team_workloads {
        println!(
            "- Team {}: {}/{} on duty ({:.0}%), {} reassignable",
            team.team,
            team.on_duty_workers,
            team.total_workers,
            team.utilization_rate,
            team.reassignable_pool.len()
        );
    }
    for impact in impacts {
        for position in &impact.positions {
            println!(
                "  {} absence at {}: {:.0}% capacity remaining",
                impact.worker_id,
                position.position_code,
                position.remaining_capacity * 100.0
            );
        }
        for action in &impact.suggested_actions {
            println!("    ! {action}");
        }
    }
    if plan.suggestions.is_empty() {
        println!("  No adjustments needed or available");
    }
    for suggestion in &plan.suggestions {
        let workers: Vec<&str> = suggestion
            .affected_workers
            .iter()
            .map(|worker| worker.worker_id.as_str())
            .collect();
        println!(
            "  [{}] {} for {}: {} | +{:.1}h delay",
            suggestion.priority,
            suggestion.adjustment_label,
            suggestion.origin_position,
            workers.join(", "),
            suggestion.cycle_time_impact.delay_hours
        );
        println!("      {}", suggestion.implementation_note);
    }
    for position in plan.unremedied_positions() {
        println!("  No automatic remedy for {position}");
    }
}

fn render_week(week: &WeeklySchedule) {
    let summary = week.summary();
    println!(
        "\nWeek for {}: {} assignments over {} days (avg {}/day)",
        week.product_code, summary.total_assignments, summary.days, summary.average_per_day
    );
    for day in &summary.daily {
        println!(
            "- {} {}: {} workers across {} positions",
            day.date.format("%a"),
            day.date,
            day.assigned_headcount,
            day.positions
        );
    }
}

const DEMO_PRODUCT: &str = "LX-200";

fn demo_dataset() -> StaffingDataset {
    let task = |position: &str, headcount: u32| Task {
        product_code: DEMO_PRODUCT.to_string(),
        position_code: position.to_string(),
        required_headcount: headcount,
    };
    let position = |center: &str, code: &str, level: u32| PositionRequirement {
        position_code: code.to_string(),
        work_center: center.to_string(),
        required_skill_level: level,
    };
    let worker = |id: &str, name: &str, team: &str, skills: &[(&str, u32)]| Worker {
        worker_id: id.to_string(),
        name: name.to_string(),
        team: Some(team.to_string()),
        skills: skills
            .iter()
            .map(|(code, level)| (code.to_string(), *level))
            .collect::<BTreeMap<_, _>>(),
    };

    StaffingDataset {
        tasks: vec![
            task("WELD-01", 2),
            task("PAINT-01", 1),
            task("ASSY-01", 2),
            task("QC-01", 1),
        ],
        positions: vec![
            position("Body Shop", "WELD-01", 3),
            position("Paint Shop", "PAINT-01", 2),
            position("Final Assembly", "ASSY-01", 3),
            position("Final Assembly", "QC-01", 4),
        ],
        workers: vec![
            worker("E101", "Mara Lind", "Body", &[("WELD-01", 4), ("ASSY-01", 3)]),
            worker("E102", "Jon Park", "Body", &[("WELD-01", 3), ("PAINT-01", 2)]),
            worker("E103", "Ines Roy", "Body", &[("WELD-01", 2), ("ASSY-01", 3)]),
            worker("E201", "Tom Weir", "Finish", &[("PAINT-01", 4), ("QC-01", 3)]),
            worker("E202", "Ava Chen", "Finish", &[("PAINT-01", 3), ("ASSY-01", 2)]),
            worker("E301", "Raj Iyer", "Assembly", &[("ASSY-01", 4), ("QC-01", 4)]),
            worker("E302", "Lea Novak", "Assembly", &[("ASSY-01", 2), ("WELD-01", 3)]),
            worker("E303", "Sam Otto", "Assembly", &[("QC-01", 5), ("ASSY-01", 3)]),
        ],
    }
}

fn demo_leaves(schedule: &DaySchedule) -> Vec<LeaveRecord> {
    schedule
        .groups
        .iter()
        .find_map(|group| group.workers.first())
        .map(|worker| LeaveRecord {
            worker_id: worker.worker_id.clone(),
            name: worker.worker_name.clone(),
            date: schedule.date,
            leave_type: LeaveType::Sick,
            hours: 8.0,
            affected_positions: vec![worker.position_code.clone()],
            urgency: Urgency::High,
        })
        .into_iter()
        .collect()
}
