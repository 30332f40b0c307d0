//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, request ID)
//!     → [protocol upgrade check]
//!     → [redirect resolution via dns + redirect subsystems]
//!     → response.rs (301/302/404/502 construction)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use server::HttpServer;
