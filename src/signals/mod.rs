//! Signal evaluation interfaces.

pub mod signal_generator;

pub use signal_generator::*;
