//! Command implementations.

pub mod analyze;

pub use analyze::execute as analyze_execute;
