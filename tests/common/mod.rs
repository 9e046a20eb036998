//! Common test utilities and fixtures for integration tests.
//!
//! Provides factory functions for realistic provider API response bodies so
//! individual tests only state what varies.

pub mod fixtures;
