use super::assignment::{AssignmentEngine, DaySchedule};
use super::domain::StaffingError;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::info;

pub const DAYS_PER_WEEK: usize = 7;

/// Monday through Sunday of the week containing `date`.
pub fn week_of(date: NaiveDate) -> [NaiveDate; DAYS_PER_WEEK] {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    std::array::from_fn(|offset| monday + Duration::days(offset as i64))
}

/// Day schedules for one week, keyed by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub product_code: String,
    pub days: BTreeMap<NaiveDate, DaySchedule>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyLoad {
    pub date: NaiveDate,
    pub assigned_headcount: usize,
    pub positions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklySummary {
    pub days: usize,
    pub total_assignments: usize,
    pub average_per_day: usize,
    pub daily: Vec<DailyLoad>,
}

impl WeeklySchedule {
    pub fn day(&self, date: NaiveDate) -> Option<&DaySchedule> {
        self.days.get(&date)
    }

    /// Dates on which `worker_id` holds any assignment.
    pub fn dates_for_worker(&self, worker_id: &str) -> Vec<NaiveDate> {
        self.days
            .iter()
            .filter(|(_, day)| day.assigned_worker_ids().any(|id| id == worker_id))
            .map(|(date, _)| *date)
            .collect()
    }

    pub fn summary(&self) -> WeeklySummary {
        let daily: Vec<DailyLoad> = self
            .days
            .values()
            .map(|day| DailyLoad {
                date: day.date,
                assigned_headcount: day.assignments.len(),
                positions: day.groups.len(),
            })
            .collect();
        let total_assignments = daily.iter().map(|d| d.assigned_headcount).sum();
        let average_per_day = if daily.is_empty() {
            0
        } else {
            total_assignments / daily.len()
        };

        WeeklySummary {
            days: daily.len(),
            total_assignments,
            average_per_day,
            daily,
        }
    }
}

impl AssignmentEngine<'_> {
    /// Run the day assignment once per date in the order given. Workers placed
    /// on an earlier date are excluded from every later date of the run.
    pub fn assign_week(
        &self,
        week_dates: &[NaiveDate; DAYS_PER_WEEK],
        product_code: &str,
    ) -> Result<WeeklySchedule, StaffingError> {
        let mut committed: HashSet<String> = HashSet::new();
        let mut days = BTreeMap::new();

        for &date in week_dates {
            let day = self.assign_day(date, product_code, &committed)?;
            committed.extend(day.assigned_worker_ids().map(str::to_string));
            days.insert(date, day);
        }

        info!(
            product_code,
            workers = committed.len(),
            start = %week_dates[0],
            "weekly schedule computed"
        );

        Ok(WeeklySchedule {
            product_code: product_code.trim().to_string(),
            days,
        })
    }
}
