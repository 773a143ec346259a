//! Employment lifecycle engine.
//!
//! The [`labor`] module holds the domain model: linked employment snapshots, the
//! labor resource aggregate that owns them, and the domain service that loads,
//! mutates, persists, and publishes through ports. [`config`], [`telemetry`], and
//! [`error`] carry the process-level concerns shared by binaries.

pub mod config;
pub mod error;
pub mod labor;
pub mod telemetry;
