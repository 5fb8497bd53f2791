//! Greenlight: content-approval workflow engine for agency kanban boards.
//!
//! This crate implements the production pipeline behind a social-media
//! content agency's kanban: operational tasks move from briefing through
//! copywriting, design, and two review gates to scheduling, and a
//! secret-token link gives one unauthenticated client reviewer access to an
//! external approval surface.
//!
//! # Architecture
//!
//! Greenlight follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`workflow`]: Task aggregate, status pipeline, and board services
//! - [`review`]: External client review surface (snapshot, link, page)

pub mod review;
pub mod workflow;
