use chrono::NaiveDate;
use line_staffing::workflows::staffing::domain::{PositionRequirement, Task};
use line_staffing::workflows::staffing::performance::{MatchStatus, TrainingDuration};
use line_staffing::workflows::staffing::{
    AssignmentEngine, MissingInput, PerformanceConfig, PerformanceScorer, StaffingDataset,
    StaffingError, Worker,
};
use std::collections::{BTreeMap, HashSet};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).expect("valid date")
}

fn worker(id: &str, team: &str, skills: &[(&str, u32)]) -> Worker {
    Worker {
        worker_id: id.to_string(),
        name: format!("Worker {id}"),
        team: Some(team.to_string()),
        skills: skills
            .iter()
            .map(|(code, level)| (code.to_string(), *level))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn single_position(required_headcount: u32) -> StaffingDataset {
    StaffingDataset {
        tasks: vec![Task {
            product_code: "C1".to_string(),
            position_code: "P1".to_string(),
            required_headcount,
        }],
        positions: vec![PositionRequirement {
            position_code: "P1".to_string(),
            work_center: "WC1".to_string(),
            required_skill_level: 3,
        }],
        workers: vec![
            worker("W1", "teamA", &[("P1", 4)]),
            worker("W2", "teamA", &[("P1", 2)]),
            worker("W3", "teamA", &[("P1", 0)]),
        ],
    }
}

#[test]
fn qualified_worker_first_then_fallback_fill() {
    let dataset = single_position(2);
    let engine = AssignmentEngine::new(&dataset).expect("valid dataset");

    let schedule = engine
        .assign_day(date(), "C1", &HashSet::new())
        .expect("schedule builds");

    let ids: Vec<&str> = schedule.assigned_worker_ids().collect();
    assert_eq!(ids, vec!["W1", "W2"]);
    let group = &schedule.groups[0];
    assert_eq!(group.assigned_headcount, 2);
    assert_eq!(group.required_headcount, 2);
    assert_eq!(group.work_center, "WC1");
    assert_eq!(group.team, "teamA");
    assert_eq!(group.required_skill_label, "Level 3");
}

#[test]
fn zero_skill_worker_never_fills_a_shortfall() {
    let dataset = single_position(3);
    let engine = AssignmentEngine::new(&dataset).expect("valid dataset");

    let schedule = engine
        .assign_day(date(), "C1", &HashSet::new())
        .expect("under-fill is not an error");

    let group = &schedule.groups[0];
    assert_eq!(group.assigned_headcount, 2);
    assert!(!group.contains_worker("W3"));
    assert!(!group.is_fully_staffed());
}

#[test]
fn excluded_workers_are_not_considered() {
    let dataset = single_position(2);
    let engine = AssignmentEngine::new(&dataset).expect("valid dataset");
    let excluded: HashSet<String> = ["W1".to_string()].into_iter().collect();

    let schedule = engine
        .assign_day(date(), "C1", &excluded)
        .expect("schedule builds");

    let ids: Vec<&str> = schedule.assigned_worker_ids().collect();
    assert_eq!(ids, vec!["W2"]);
}

#[test]
fn headcount_never_exceeds_requirement_or_candidates() {
    let mut dataset = single_position(1);
    dataset.tasks.push(Task {
        product_code: "C2".to_string(),
        position_code: "P1".to_string(),
        required_headcount: 9,
    });
    let engine = AssignmentEngine::new(&dataset).expect("valid dataset");

    for (product, expected) in [("C1", 1), ("C2", 2)] {
        let schedule = engine
            .assign_day(date(), product, &HashSet::new())
            .expect("schedule builds");
        let group = &schedule.groups[0];
        assert_eq!(group.assigned_headcount, expected, "product {product}");
        assert!(group.assigned_headcount <= group.required_headcount);
        assert_eq!(group.workers.len() as u32, group.assigned_headcount);
    }
}

#[test]
fn missing_inputs_fail_before_any_work() {
    let mut dataset = single_position(1);
    dataset.workers.clear();

    let error = AssignmentEngine::new(&dataset).expect_err("skill matrix required");
    assert_eq!(error, StaffingError::MissingInput(MissingInput::SkillMatrix));
}

#[test]
fn scoring_a_mixed_group_flags_training() {
    let dataset = single_position(2);
    let engine = AssignmentEngine::new(&dataset).expect("valid dataset");
    let schedule = engine
        .assign_day(date(), "C1", &HashSet::new())
        .expect("schedule builds");
    let scorer = PerformanceScorer::new(PerformanceConfig::default());

    let report = scorer.score(&schedule.groups);

    let position = &report.skill_match.positions[0];
    assert_eq!(position.meeting_count, 1);
    assert_eq!(position.assigned_count, 2);
    assert_eq!(position.match_rate, 50.0);
    assert_eq!(position.status, MatchStatus::NeedsTraining);

    let plan = &report.skill_match.training_plans[0];
    assert_eq!(plan.trainees.len(), 1);
    assert_eq!(plan.trainees[0].worker_id, "W2");
    assert_eq!(plan.trainees[0].duration, TrainingDuration::TwoToFourWeeks);

    assert_eq!(report.hour_utilization.overall_utilization, 100.0);
    assert_eq!(scorer.score(&schedule.groups), report);
}
