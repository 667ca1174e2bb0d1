use chrono::NaiveDate;
use clap::Args;
use line_staffing::error::AppError;
use line_staffing::workflows::catalog::CatalogImporter;
use line_staffing::workflows::staffing::{FillStatus, LeaveRecord, StaffingDataset};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// CSV sources for the three upstream tables.
#[derive(Args, Debug, Clone)]
pub(crate) struct DatasetArgs {
    /// Task table: product, position, headcount
    #[arg(long)]
    pub(crate) tasks: PathBuf,
    /// Position catalog: work center, position, required level
    #[arg(long)]
    pub(crate) positions: PathBuf,
    /// Skill matrix: name, id, team, then one column per position code
    #[arg(long)]
    pub(crate) skills: PathBuf,
}

impl DatasetArgs {
    pub(crate) fn load(&self) -> Result<StaffingDataset, AppError> {
        CatalogImporter::dataset_from_paths(&self.tasks, &self.positions, &self.skills)
            .map_err(AppError::from)
    }
}

pub(crate) fn load_leaves(path: &Path) -> Result<Vec<LeaveRecord>, AppError> {
    CatalogImporter::leaves_from_path(path).map_err(AppError::from)
}

pub(crate) fn parse_fill_status(raw: &str) -> Result<FillStatus, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "all" => Ok(FillStatus::All),
        "full" => Ok(FillStatus::Full),
        "short" => Ok(FillStatus::Short),
        other => Err(format!("unknown fill status '{other}' (expected all, full or short)")),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("JSON output unavailable: {err}"),
    }
}
