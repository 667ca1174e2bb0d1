//! CSV loading for the three upstream staffing tables and the leave register.
//!
//! Columns are read by position; the first row is always treated as a header.
//! Rows missing their key code are dropped, and numeric cells that do not
//! parse read as zero.

mod normalizer;
mod parser;

use crate::workflows::staffing::domain::{
    LeaveRecord, PositionRequirement, StaffingDataset, Task, Worker,
};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read staffing table: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid staffing CSV data: {}", err),
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct CatalogImporter;

impl CatalogImporter {
    pub fn tasks_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Task>, CatalogImportError> {
        Self::tasks_from_reader(File::open(path)?)
    }

    pub fn tasks_from_reader<R: Read>(reader: R) -> Result<Vec<Task>, CatalogImportError> {
        let tasks = parser::parse_tasks(reader)?;
        debug!(rows = tasks.len(), "task table loaded");
        Ok(tasks)
    }

    pub fn positions_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<PositionRequirement>, CatalogImportError> {
        Self::positions_from_reader(File::open(path)?)
    }

    pub fn positions_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<PositionRequirement>, CatalogImportError> {
        let positions = parser::parse_positions(reader)?;
        debug!(rows = positions.len(), "position catalog loaded");
        Ok(positions)
    }

    pub fn skill_matrix_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<Worker>, CatalogImportError> {
        Self::skill_matrix_from_reader(File::open(path)?)
    }

    pub fn skill_matrix_from_reader<R: Read>(reader: R) -> Result<Vec<Worker>, CatalogImportError> {
        let workers = parser::parse_skill_matrix(reader)?;
        debug!(rows = workers.len(), "skill matrix loaded");
        Ok(workers)
    }

    pub fn leaves_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<LeaveRecord>, CatalogImportError> {
        Self::leaves_from_reader(File::open(path)?)
    }

    pub fn leaves_from_reader<R: Read>(reader: R) -> Result<Vec<LeaveRecord>, CatalogImportError> {
        let leaves = parser::parse_leaves(reader)?;
        debug!(rows = leaves.len(), "leave register loaded");
        Ok(leaves)
    }

    /// Load all three upstream tables. Emptiness is left for the engine to
    /// reject so the caller learns which table is missing.
    pub fn dataset_from_paths<T, P, S>(
        tasks: T,
        positions: P,
        skill_matrix: S,
    ) -> Result<StaffingDataset, CatalogImportError>
    where
        T: AsRef<Path>,
        P: AsRef<Path>,
        S: AsRef<Path>,
    {
        Ok(StaffingDataset {
            tasks: Self::tasks_from_path(tasks)?,
            positions: Self::positions_from_path(positions)?,
            workers: Self::skill_matrix_from_path(skill_matrix)?,
        })
    }
}
