//! HTTP adapter
//!
//! reqwest-backed implementation of the catalog and probe ports.

pub mod client;

pub use client::HttpFeedClient;
