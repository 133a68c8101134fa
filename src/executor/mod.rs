//! Suite execution engine
//!
//! Provides sequential execution of registered suites.

mod runner;

pub use runner::SuiteRunner;
