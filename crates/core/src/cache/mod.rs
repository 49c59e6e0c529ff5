//! In-memory, time-bounded cache for lookup results.
//!
//! This module provides a process-wide store that is created once at startup
//! and handed to whoever performs lookups. It supports:
//!
//! - Identifier normalization so `@Name`, `name` and ` Name ` share one entry
//! - Staleness checks on read: expired entries are reported as misses
//! - Last-write-wins overwrites on every refetch

pub mod key;
pub mod store;

pub use key::cache_key;
pub use store::{CacheEntry, ResultCache};
