//! Local storage: app paths, configuration, and the connection store.

pub mod config;
pub mod connections;
pub mod paths;
