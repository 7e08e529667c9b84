//! # Test Suite for the World Clock
//!
//! Scenario tests that drive the engine through its public API the way the
//! terminal front end does, plus command-line parsing checks.

mod cli_tests;
