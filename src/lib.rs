//! NeoLoad test statistics server library.
//!
//! Fetches load-test results from the NeoLoad Web API and aggregates them
//! into per-test pass/fail statistics grouped by workspace.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
