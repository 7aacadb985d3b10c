//! Reports module for the finance tracker
//!
//! Chart-ready aggregate series over the transaction collection.

pub mod charts;

pub use charts::{monthly_trends, spending_by_category, CategorySpending, ChartReport, MonthlyTrend};
