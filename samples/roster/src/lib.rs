//! roster-sample
//!
//! Reads a staff roster and reports on it with eager and lazy collection
//! pipelines.

pub mod report;
pub mod roster;
