//! Statistics E2E test suite.
//!
//! Runs the statistics endpoints against an in-process mock of the NeoLoad Web API.
//!
//! Run with: cargo test --test stats_e2e

mod mock_neoload;
mod test_helpers;

mod test_docs;
mod test_health;
