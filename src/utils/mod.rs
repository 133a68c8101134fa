//! Shared utilities

mod timer;

pub use timer::Timer;
