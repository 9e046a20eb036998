//! Core domain logic: aggregation, reporting window, HTTP, OAuth, logging.

pub mod aggregate;
pub mod http;
pub mod logging;
pub mod models;
pub mod oauth;
pub mod window;
