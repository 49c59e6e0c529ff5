//! Client code for followcount.
//!
//! This crate provides the follower count extraction chain, profile URL
//! construction and the HTTP fetch collaborator used by the server.

pub mod extract;
pub mod fetch;
pub mod profile;

pub use extract::{ExtractionResult, Source, extract, to_number};
pub use fetch::{FetchClient, FetchConfig, FetchedPage, ProfileSource, snippet};
pub use profile::{normalize_handle, profile_url};
