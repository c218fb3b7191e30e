//! Shared request handling utilities

pub mod error;

pub use error::ApiError;
