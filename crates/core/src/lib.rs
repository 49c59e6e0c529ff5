//! Core types and shared functionality for followcount.
//!
//! This crate provides:
//! - In-memory TTL cache for lookup results
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheEntry, ResultCache, cache_key};
pub use config::{AppConfig, ConfigError, Transport};
pub use error::Error;
