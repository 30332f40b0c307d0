//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; the subscriber is installed in main
//! - Metrics are cheap (atomic increments) and labeled by request outcome
//! - The Prometheus exporter is opt-in and listens on its own port

pub mod metrics;
