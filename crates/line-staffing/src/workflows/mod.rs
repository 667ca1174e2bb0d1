pub mod catalog;
pub mod staffing;
