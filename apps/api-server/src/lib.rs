//! # DevHub API Server
//!
//! Actix-web application: configuration, state, middleware and routes. The
//! binary in `main.rs` wires these together; tests build the same app around
//! in-memory state.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;
