//! Common test utilities and helpers
//!
//! Shared snapshot fixtures for integration tests.
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures;
//!
//! fn test_analyze() {
//!     let (dir, path) = fixtures::write_snapshot(&fixtures::basic_snapshot()).unwrap();
//!     // run the CLI against `path` inside `dir`
//! }
//! ```

pub mod fixtures;
