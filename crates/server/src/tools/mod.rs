//! MCP tool implementations.
//!
//! This module contains all tools exposed by the followcount server.

pub mod follower_count;
pub mod follower_extract;

pub use follower_count::{FollowerCountParams, count_impl};
pub use follower_extract::{FollowerExtractParams, extract_impl};
