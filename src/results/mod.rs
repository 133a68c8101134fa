//! Results storage module
//!
//! Provides persistent storage for finished run reports.

mod storage;

pub use storage::{RunStorage, StoredRun};
