//! Provider REST clients.

pub mod analytics;
pub mod payments;
