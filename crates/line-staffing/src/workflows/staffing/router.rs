use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::adjustment::{
    analyze_leave_impact, AdjustmentPlan, AdjustmentRecommender, LeaveImpactAnalysis,
};
use super::assignment::{AssignmentEngine, DaySummary};
use super::domain::{
    Assignment, LeaveRecord, MissingInput, PositionGroup, StaffingDataset, StaffingError, Worker,
};
use super::filter::{filter_options, FilterOptions, PositionGroupFilter};
use super::performance::{PerformanceConfig, PerformanceScorer};
use super::weekly::{week_of, WeeklySchedule, WeeklySummary};

#[derive(Debug, Deserialize)]
pub struct DayRequest {
    pub date: NaiveDate,
    pub product_code: String,
    #[serde(flatten)]
    pub dataset: StaffingDataset,
    #[serde(default)]
    pub already_assigned: Vec<String>,
    #[serde(default)]
    pub filter: Option<PositionGroupFilter>,
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: NaiveDate,
    pub product_code: String,
    pub summary: DaySummary,
    pub assignments: Vec<Assignment>,
    pub groups: Vec<PositionGroup>,
    pub filter_options: FilterOptions,
}

#[derive(Debug, Deserialize)]
pub struct WeekRequest {
    /// Any date inside the target week.
    pub week_of: NaiveDate,
    pub product_code: String,
    #[serde(flatten)]
    pub dataset: StaffingDataset,
}

#[derive(Debug, Serialize)]
pub struct WeekResponse {
    pub summary: WeeklySummary,
    pub schedule: WeeklySchedule,
}

#[derive(Debug, Deserialize)]
pub struct PerformanceRequest {
    pub groups: Vec<PositionGroup>,
}

#[derive(Debug, Deserialize)]
pub struct AdjustmentRequest {
    pub date: NaiveDate,
    pub product_code: String,
    pub groups: Vec<PositionGroup>,
    pub skill_matrix: Vec<Worker>,
    #[serde(default)]
    pub leaves: Vec<LeaveRecord>,
}

#[derive(Debug, Serialize)]
pub struct AdjustmentResponse {
    pub plan: AdjustmentPlan,
    pub leave_impacts: Vec<LeaveImpactAnalysis>,
    pub unremedied_positions: Vec<String>,
}

/// JSON endpoints over the assignment, scoring, and adjustment engines.
pub fn staffing_router(config: PerformanceConfig) -> Router {
    Router::new()
        .route("/api/v1/staffing/day", post(day_handler))
        .route("/api/v1/staffing/week", post(week_handler))
        .route("/api/v1/staffing/performance", post(performance_handler))
        .route("/api/v1/staffing/adjustments", post(adjustment_handler))
        .with_state(Arc::new(PerformanceScorer::new(config)))
}

pub(crate) async fn day_handler(Json(request): Json<DayRequest>) -> Response {
    let DayRequest {
        date,
        product_code,
        dataset,
        already_assigned,
        filter,
    } = request;
    let already_assigned: HashSet<String> = already_assigned.into_iter().collect();

    let schedule = match AssignmentEngine::new(&dataset)
        .and_then(|engine| engine.assign_day(date, &product_code, &already_assigned))
    {
        Ok(schedule) => schedule,
        Err(error) => return staffing_error_response(error),
    };

    let summary = schedule.summary();
    let filter_options = filter_options(&schedule.groups);
    let groups = match filter {
        Some(filter) => filter.apply(&schedule.groups).into_iter().cloned().collect(),
        None => schedule.groups.clone(),
    };

    let body = DayResponse {
        date: schedule.date,
        product_code: schedule.product_code,
        summary,
        assignments: schedule.assignments,
        groups,
        filter_options,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) async fn week_handler(Json(request): Json<WeekRequest>) -> Response {
    let dates = week_of(request.week_of);

    match AssignmentEngine::new(&request.dataset)
        .and_then(|engine| engine.assign_week(&dates, &request.product_code))
    {
        Ok(schedule) => {
            let body = WeekResponse {
                summary: schedule.summary(),
                schedule,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => staffing_error_response(error),
    }
}

pub(crate) async fn performance_handler(
    State(scorer): State<Arc<PerformanceScorer>>,
    Json(request): Json<PerformanceRequest>,
) -> Response {
    let report = scorer.score(&request.groups);
    (StatusCode::OK, Json(report)).into_response()
}

pub(crate) async fn adjustment_handler(Json(request): Json<AdjustmentRequest>) -> Response {
    let AdjustmentRequest {
        date,
        product_code,
        groups,
        skill_matrix,
        leaves,
    } = request;

    if skill_matrix.is_empty() {
        return staffing_error_response(StaffingError::MissingInput(MissingInput::SkillMatrix));
    }

    let plan = AdjustmentRecommender::new(&skill_matrix).recommend(
        date,
        &product_code,
        &groups,
        &leaves,
    );
    let leave_impacts = leaves
        .iter()
        .filter(|leave| leave.date == date)
        .map(|leave| analyze_leave_impact(&groups, leave))
        .collect();
    let unremedied_positions = plan
        .unremedied_positions()
        .into_iter()
        .map(str::to_string)
        .collect();

    let body = AdjustmentResponse {
        plan,
        leave_impacts,
        unremedied_positions,
    };
    (StatusCode::OK, Json(body)).into_response()
}

fn staffing_error_response(error: StaffingError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    fn dataset_json() -> Value {
        json!({
            "tasks": [
                { "product_code": "C1", "position_code": "P1", "required_headcount": 2 },
                { "product_code": "C1", "position_code": "P2", "required_headcount": 1 }
            ],
            "positions": [
                { "position_code": "P1", "work_center": "WC1", "required_skill_level": 3 },
                { "position_code": "P2", "work_center": "WC2", "required_skill_level": 2 }
            ],
            "workers": [
                { "worker_id": "W1", "name": "Ana", "team": "A", "skills": { "P1": 4 } },
                { "worker_id": "W2", "name": "Ben", "team": "A", "skills": { "P1": 2, "P2": 3 } },
                { "worker_id": "W3", "name": "Cai", "team": "B", "skills": { "P2": 2 } }
            ]
        })
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let router = staffing_router(PerformanceConfig::default());
        let response = router
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
                    .expect("request"),
            )
            .await
            .expect("router responds");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let value = serde_json::from_slice(&bytes).expect("json body");
        (status, value)
    }

    #[tokio::test]
    async fn day_route_returns_assignments_and_options() {
        let mut body = dataset_json();
        body["date"] = json!("2025-03-03");
        body["product_code"] = json!("C1");

        let (status, value) = post_json("/api/v1/staffing/day", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["summary"]["assigned_headcount"], 3);
        assert_eq!(value["groups"][0]["workers"][0]["worker_id"], "W1");
        assert_eq!(value["filter_options"]["teams"], json!(["A", "B"]));
    }

    #[tokio::test]
    async fn day_route_applies_filter_to_groups() {
        let mut body = dataset_json();
        body["date"] = json!("2025-03-03");
        body["product_code"] = json!("C1");
        body["filter"] = json!({ "work_center": "WC2" });

        let (status, value) = post_json("/api/v1/staffing/day", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["groups"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["groups"][0]["position_code"], "P2");
        assert_eq!(value["filter_options"]["work_centers"], json!(["WC1", "WC2"]));
    }

    #[tokio::test]
    async fn day_route_rejects_missing_tables() {
        let body = json!({ "date": "2025-03-03", "product_code": "C1" });

        let (status, value) = post_json("/api/v1/staffing/day", body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(value["error"], "missing required input: task data");
    }

    #[tokio::test]
    async fn week_route_spans_monday_to_sunday() {
        let mut body = dataset_json();
        body["week_of"] = json!("2025-03-06");
        body["product_code"] = json!("C1");

        let (status, value) = post_json("/api/v1/staffing/week", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["summary"]["days"], 7);
        assert_eq!(value["summary"]["daily"][0]["date"], "2025-03-03");
        assert_eq!(value["summary"]["total_assignments"], 3);
    }

    #[tokio::test]
    async fn performance_route_scores_groups() {
        let body = json!({
            "groups": [{
                "position_code": "P1",
                "work_center": "WC1",
                "team": "A",
                "required_skill_label": "Level 3",
                "required_headcount": 2,
                "assigned_headcount": 2,
                "workers": [
                    { "position_code": "P1", "worker_id": "W1", "worker_name": "Ana", "skill_level": 4,
                      "team": "A", "work_center": "WC1", "date": "2025-03-03" },
                    { "position_code": "P1", "worker_id": "W2", "worker_name": "Ben", "skill_level": 2,
                      "team": "A", "work_center": "WC1", "date": "2025-03-03" }
                ]
            }]
        });

        let (status, value) = post_json("/api/v1/staffing/performance", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(value["skill_match"]["overall_match_rate"], 50.0);
        assert_eq!(value["hour_utilization"]["overall_utilization"], 100.0);
    }

    #[tokio::test]
    async fn adjustment_route_requires_skill_matrix() {
        let body = json!({
            "date": "2025-03-03",
            "product_code": "C1",
            "groups": [],
            "skill_matrix": []
        });

        let (status, value) = post_json("/api/v1/staffing/adjustments", body).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(value["error"], "missing required input: skill matrix");
    }
}
