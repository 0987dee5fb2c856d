//! # Svcgate
//!
//! HTTP control plane for operating-system background work units: services
//! and scheduled tasks. Exposes wildcard lookup, status reporting, and
//! start/stop/restart actions over a small Axum API.
//!
//! ## Architecture Overview
//!
//! - [`resolve`] - Wildcard pattern matching, allow-list filtering, and
//!   name resolution over a catalog snapshot
//! - [`lifecycle`] - Start/stop idempotence guards and the bounded restart
//!   state machine
//! - [`catalog`] - Resource snapshot types and the OS collaborator traits,
//!   with systemd-backed production implementations
//! - [`web`] - Axum routes, handlers, shared state, and API error types
//! - [`config`] - Layered configuration loading
//!
//! The OS service manager and task scheduler are external systems; this
//! crate only consumes their semantics through the [`catalog::UnitManager`]
//! and [`catalog::EventHistory`] traits, so tests substitute in-memory fakes.

pub mod catalog;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod resolve;
pub mod web;

pub use config::SvcgateConfig;
pub use error::{Result, SvcgateError};
