//! Task approval workflow for Greenlight.
//!
//! This module maintains a task's lifecycle status, enforces the approval
//! gates of the operational pipeline, manages the secret token used for
//! unauthenticated client review, and records feedback on rejection. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
