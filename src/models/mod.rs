//! Data models for suite orchestration
//!
//! This module contains all data structures used throughout the application.

mod outcome;
mod suite;

pub use outcome::{RunReport, SuiteOutcome, SuiteStatus};
pub use suite::SuiteSpec;
