//! beanc - Bean Counter
//!
//! A terminal dashboard for Google Analytics traffic and Stripe revenue.
//! Connects provider accounts via OAuth, stores connections locally, and
//! aggregates a 7-day visitor/revenue view across every tracked property.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod core;
pub mod error;
pub mod providers;
pub mod render;
pub mod storage;
pub mod util;

pub use error::{BeancError, ExitCode, Result};
