//! CLI front-end: flag parsing and batch execution.

pub mod args;
pub mod batch;

pub use args::RunArgs;
