//! Driving adapters: the CSV event script, its replay, and the report.

pub mod csv;
pub mod replay;
