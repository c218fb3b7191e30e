//! # TrackPerf API
//!
//! HTTP layer for the TrackPerf backend: request DTOs, route handlers,
//! bearer-token middleware and the error-to-HTTP mapping.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
