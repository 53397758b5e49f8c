//! Command implementations

pub mod ask;
pub mod dispatch;
pub mod generate;
pub mod grade;
pub mod report;
pub mod run;
