//! REST client and wire types for the production console backend.

pub mod client;
pub mod types;

pub use client::{ApiClient, UNKNOWN_MATERIAL};
