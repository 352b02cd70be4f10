//! The fetch engine
//!
//! Transport construction, the per-target worker protocol, the
//! bounded-concurrency scheduler, and the proxy self-check.

pub mod client;
pub mod scheduler;
pub mod selfcheck;
pub mod worker;

pub use client::build_http_client;
pub use scheduler::{dispatch, run};
pub use selfcheck::verify_proxy;
pub use worker::{fetch_target, target_file_name, FetchFailure, FetchOutcome};
