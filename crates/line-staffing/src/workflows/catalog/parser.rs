use super::normalizer::{normalize_code, parse_count, parse_hours};
use crate::workflows::staffing::domain::{
    LeaveRecord, LeaveType, PositionRequirement, Task, Urgency, Worker,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::io::Read;

const LEAVE_POSITION_SEPARATOR: char = ';';
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source)
}

fn cell(record: &csv::StringRecord, index: usize) -> String {
    record.get(index).map(normalize_code).unwrap_or_default()
}

/// Product, position, headcount.
pub(crate) fn parse_tasks<R: Read>(source: R) -> Result<Vec<Task>, csv::Error> {
    let mut tasks = Vec::new();

    for record in reader(source).records() {
        let record = record?;
        let product_code = cell(&record, 0);
        let position_code = cell(&record, 1);
        if product_code.is_empty() || position_code.is_empty() {
            continue;
        }

        tasks.push(Task {
            product_code,
            position_code,
            required_headcount: parse_count(&cell(&record, 2)),
        });
    }

    Ok(tasks)
}

/// Work center, position, required level.
pub(crate) fn parse_positions<R: Read>(source: R) -> Result<Vec<PositionRequirement>, csv::Error> {
    let mut positions = Vec::new();

    for record in reader(source).records() {
        let record = record?;
        let work_center = cell(&record, 0);
        let position_code = cell(&record, 1);
        if work_center.is_empty() || position_code.is_empty() {
            continue;
        }

        positions.push(PositionRequirement {
            position_code,
            work_center,
            required_skill_level: parse_count(&cell(&record, 2)),
        });
    }

    Ok(positions)
}

/// Name, id, team, then one skill column per position code named in the header.
pub(crate) fn parse_skill_matrix<R: Read>(source: R) -> Result<Vec<Worker>, csv::Error> {
    let mut csv_reader = reader(source);
    let position_columns: Vec<(usize, String)> = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .skip(3)
        .map(|(index, header)| (index, normalize_code(header)))
        .filter(|(_, code)| !code.is_empty())
        .collect();

    let mut workers = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let name = cell(&record, 0);
        let worker_id = cell(&record, 1);
        if name.is_empty() || worker_id.is_empty() {
            continue;
        }

        let skills: BTreeMap<String, u32> = position_columns
            .iter()
            .map(|(index, code)| (code.clone(), parse_count(&cell(&record, *index))))
            .filter(|(_, level)| *level > 0)
            .collect();
        let team = cell(&record, 2);

        workers.push(Worker {
            worker_id,
            name,
            team: (!team.is_empty()).then_some(team),
            skills,
        });
    }

    Ok(workers)
}

/// Worker id, name, date, leave type, hours, `;`-separated positions, urgency.
pub(crate) fn parse_leaves<R: Read>(source: R) -> Result<Vec<LeaveRecord>, csv::Error> {
    let mut leaves = Vec::new();

    for record in reader(source).records() {
        let record = record?;
        let worker_id = cell(&record, 0);
        if worker_id.is_empty() {
            continue;
        }
        let Some(date) = parse_date(&cell(&record, 2)) else {
            continue;
        };

        leaves.push(LeaveRecord {
            worker_id,
            name: cell(&record, 1),
            date,
            leave_type: LeaveType::from_str_lossy(&cell(&record, 3)),
            hours: parse_hours(&cell(&record, 4)),
            affected_positions: cell(&record, 5)
                .split(LEAVE_POSITION_SEPARATOR)
                .map(normalize_code)
                .filter(|code| !code.is_empty())
                .collect(),
            urgency: Urgency::from_str_lossy(&cell(&record, 6)),
        });
    }

    Ok(leaves)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}
