//! Integration tests
//!
//! End-to-end coverage of the fetch engine and the proxy self-check against
//! mock HTTP servers.

mod fetch_tests;
mod selfcheck_tests;
