pub mod adjustment;
mod assignment;
pub mod domain;
mod filter;
pub mod performance;
mod router;
mod weekly;

pub use adjustment::{
    analyze_leave_impact, AdjustmentPlan, AdjustmentRecommender, AdjustmentType,
};
pub use assignment::{AssignmentEngine, DaySchedule, DaySummary};
pub use domain::{LeaveRecord, MissingInput, PositionGroup, StaffingDataset, StaffingError, Worker};
pub use filter::{filter_options, FillStatus, FilterOptions, PositionGroupFilter};
pub use performance::{PerformanceConfig, PerformanceReport, PerformanceScorer};
pub use router::{
    staffing_router, AdjustmentRequest, AdjustmentResponse, DayRequest, DayResponse,
    PerformanceRequest, WeekRequest, WeekResponse,
};
pub use weekly::{week_of, DailyLoad, WeeklySchedule, WeeklySummary, DAYS_PER_WEEK};
