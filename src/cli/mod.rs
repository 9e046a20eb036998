//! CLI layer: argument parsing and command implementations.

pub mod args;
pub mod connect;
pub mod connections;
pub mod dashboard;

pub use args::{Cli, Commands};
