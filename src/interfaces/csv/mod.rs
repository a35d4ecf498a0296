//! CSV event scripts and known places in, dashboard reports out.

pub mod event_reader;
pub mod place_reader;
pub mod report_writer;
