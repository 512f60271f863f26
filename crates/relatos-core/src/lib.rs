//! Relatos Core - Domain models, errors, and configuration
//!
//! This crate contains the reporter and report models shared by every other
//! relatos crate, the error type, and the layered configuration.

pub mod config;
pub mod error;
pub mod models;

pub use error::{RelatosError, Result};
