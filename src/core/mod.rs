//! Core application primitives (orchestration, scheduling, HTTP)

pub mod chart;
pub mod dashboard;
pub mod http;
pub mod scheduler;

pub use dashboard::*;
pub use http::*;
pub use scheduler::*;
