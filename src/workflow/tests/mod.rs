//! Unit tests for the task approval workflow.
#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

mod domain_tests;
